use serde::Deserialize;

/// Filter applied when neither the config nor the environment names one.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfigSection {
    /// `tracing_subscriber::EnvFilter` directives, e.g. `osmium=debug`.
    pub filter: Option<String>,
}

impl LoggingConfigSection {
    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
