use super::model::ConfigurationModel;
use super::paths::resolve_config_path;
use std::fs;

/// Load the user's configuration file, falling back to defaults when absent or invalid.
pub fn load() -> ConfigurationModel {
    let path = resolve_config_path();
    if let Some(path) = path {
        match fs::read_to_string(&path) {
            Ok(contents) => match parse(&contents) {
                Ok(mut cfg) => {
                    cfg.set_source_path(path);
                    return cfg;
                }
                Err(err) => {
                    eprintln!(
                        "Warning: unable to parse config file '{}': {err}",
                        path.display()
                    );
                }
            },
            Err(err) => {
                eprintln!(
                    "Warning: unable to read config file '{}': {err}",
                    path.display()
                );
            }
        }
    }

    ConfigurationModel::default()
}

/// Parse YAML configuration text. An empty document yields the defaults.
pub fn parse(contents: &str) -> Result<ConfigurationModel, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(ConfigurationModel::default());
    }
    serde_yaml::from_str(contents)
}
