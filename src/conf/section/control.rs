use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ControlConfigSection {
    /// Collect finished background jobs before each prompt.
    pub reap_background: Option<bool>,
}

impl ControlConfigSection {
    pub fn reap_background(&self) -> bool {
        self.reap_background.unwrap_or(true)
    }
}
