// User configuration for the CLI

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tasks shown per page when the config file does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings loaded from `config.yaml` in the platform config directory.
/// A missing file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tasks shown per page.
    pub page_size: usize,
    /// Directory the snapshot file lives in. Defaults to the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Self =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        if config.page_size == 0 {
            warn!("page_size 0 in config, using default");
            config.page_size = DEFAULT_PAGE_SIZE;
        }

        debug!(path = ?path, page_size = config.page_size, "Loaded config");
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasklist/config.yaml"))
    }

    /// Directory the snapshot file lives in.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("tasklist")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "page_size: 5\ndata_dir: /tmp/tasks\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/tasks")));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/tasks"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "page_size: 25\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, 25);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "page_size: 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "page_size: [not a number\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
