//! Path constants for configuration and persisted notes.

use std::path::PathBuf;

/// The name of the configuration directory under ~/.config/
pub const CONFIG_DIR_NAME: &str = "relisten";

/// The name of the main configuration file
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The name of the persisted note list
pub const NOTES_FILE_NAME: &str = "notes.json";

/// Get the configuration directory path (~/.config/relisten/)
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(CONFIG_DIR_NAME)
}

/// Get the config file path (~/.config/relisten/config.toml)
#[must_use]
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Get the persisted note list path (`~/.config/relisten/notes.json`)
#[must_use]
pub fn notes_path() -> PathBuf {
    config_dir().join(NOTES_FILE_NAME)
}
