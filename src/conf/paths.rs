//! Where the shell looks for its YAML configuration.

use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "OSMIUM_CONFIG";
const RC_FILE_NAME: &str = ".osmiumrc";

/// `$OSMIUM_CONFIG` when set (a leading `~` means `$HOME`), otherwise
/// `~/.osmiumrc` if that file exists.
pub fn resolve_config_path() -> Option<PathBuf> {
    let explicit = env::var(CONFIG_PATH_ENV).ok();
    let home = env::var_os("HOME").map(PathBuf::from);
    config_path_from(explicit.as_deref(), home.as_deref())
}

fn config_path_from(explicit: Option<&str>, home: Option<&Path>) -> Option<PathBuf> {
    match explicit.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => Some(under_home(path, home)),
        None => home
            .map(|home| home.join(RC_FILE_NAME))
            .filter(|path| path.is_file()),
    }
}

fn under_home(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };
    match path.strip_prefix('~') {
        Some("") => home.to_path_buf(),
        Some(rest) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}
