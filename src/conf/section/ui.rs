use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptTheme {
    /// `N: ` where N counts processed lines.
    #[default]
    Numbered,
    /// Coloured working directory followed by a status arrow.
    Cwd,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfigSection {
    pub prompt_theme: Option<PromptTheme>,
}

impl UiConfigSection {
    pub fn prompt_theme(&self) -> PromptTheme {
        self.prompt_theme.unwrap_or_default()
    }
}
