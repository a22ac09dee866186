mod control;
mod logging;
mod ui;

pub use control::ControlConfigSection;
pub use logging::LoggingConfigSection;
pub use ui::{PromptTheme, UiConfigSection};
