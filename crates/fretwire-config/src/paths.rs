//! Platform-specific location of the configuration file.
//!
//! - Linux: `~/.config/fretwire/config.toml`
//! - macOS: `~/Library/Application Support/fretwire/config.toml`
//! - Windows: `%APPDATA%\fretwire\config.toml`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "fretwire";

/// File name of the configuration file.
const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user configuration file, whether or not it exists.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

/// Find the configuration file to load.
///
/// An explicit path is returned as given, even if missing, so the caller
/// reports the read error. Otherwise the default path is returned only if a
/// file exists there.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Some(default_config_path()).filter(|p| p.is_file()),
    }
}
