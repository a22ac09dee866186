mod loader;
mod model;
mod paths;
pub mod section;

pub use loader::{load, parse};
pub use model::ConfigurationModel;
pub use paths::{CONFIG_PATH_ENV, resolve_config_path};
pub use section::{ControlConfigSection, LoggingConfigSection, PromptTheme, UiConfigSection};
