use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelistenConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the default note store location
    /// (`~/.config/relisten/notes.json`).
    #[serde(default)]
    pub notes_path: Option<PathBuf>,
}

impl RelistenConfig {
    /// Load configuration from the given path. An absent file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load from the default path (`~/.config/relisten/config.toml`).
    ///
    /// # Errors
    ///
    /// Same conditions as [`load`](Self::load).
    pub fn load_default() -> Result<Self> {
        Self::load(&crate::paths::config_path())
    }

    /// Resolve the note store path, honoring the override.
    #[must_use]
    pub fn notes_path(&self) -> PathBuf {
        self.storage
            .notes_path
            .clone()
            .unwrap_or_else(crate::paths::notes_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RelistenConfig::load(&dir.path().join("config.toml")).unwrap();
        assert!(config.storage.notes_path.is_none());
        assert_eq!(config.notes_path(), crate::paths::notes_path());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        let config = RelistenConfig::load(&path).unwrap();
        assert!(config.storage.notes_path.is_none());
    }

    #[test]
    fn test_notes_path_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storage]\nnotes_path = \"/tmp/my-notes.json\"\n").unwrap();

        let config = RelistenConfig::load(&path).unwrap();
        assert_eq!(config.notes_path(), PathBuf::from("/tmp/my-notes.json"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "storage = 3").unwrap();
        assert!(RelistenConfig::load(&path).is_err());
    }
}
