// CLI configuration loaded from the user's config directory

use crate::view::Filter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Optional settings for the CLI, read from
/// `<config_dir>/todolist/config.yaml`. A missing or malformed file simply
/// yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persisted todo documents.
    pub store_dir: Option<PathBuf>,
    /// Filter applied when `list` is run without an explicit one.
    pub default_filter: Option<Filter>,
}

impl Config {
    /// Load from the default location, if the platform has one.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, falling back to defaults when the file
    /// is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = ?e, "Failed to read config, using defaults");
                return Self::default();
            }
        };
        match serde_yaml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = ?e, "Ignoring malformed config");
                Self::default()
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("todolist").join("config.yaml"))
    }

    /// Effective storage directory: the configured one, or the platform data
    /// directory (current directory as a last resort).
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("todolist")
        })
    }
}
