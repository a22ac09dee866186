//! Diagnostic logging to standard error.

use crate::conf::ConfigurationModel;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable whose directives override the configured filter.
pub const LOG_FILTER_ENV: &str = "OSMIUM_LOG";

/// Pick the filter directives: environment first, then config, then default.
pub fn filter_directives(config: &ConfigurationModel) -> String {
    std::env::var(LOG_FILTER_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.logging.filter().to_string())
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// what jobs write to stdout.
pub fn init(config: &ConfigurationModel) -> Result<(), String> {
    let directives = filter_directives(config);
    let env_filter = EnvFilter::try_new(&directives)
        .map_err(|err| format!("invalid log filter '{directives}': {err}"))?;

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| format!("failed to init tracing: {err}"))
}
