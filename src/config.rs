//! Configuration loading and management
//!
//! Handles parsing of `taskboard.toml` in the data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;
use crate::storage::DEFAULT_KEY;

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "taskboard.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Human output
    #[serde(default)]
    pub display: DisplayConfig,

    /// Board behavior
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File stem of the snapshot (`<key>.json`)
    #[serde(default = "default_key")]
    pub key: String,

    /// How long to wait for the snapshot lock
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for due dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%b %-d".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Start from the example board when nothing is stored
    #[serde(default = "default_true")]
    pub seed_when_empty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_when_empty: true,
        }
    }
}

impl Config {
    /// Load configuration from a `taskboard.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        let key = self.storage.key.trim();
        if key.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "storage.key cannot be empty".to_string(),
            ));
        }
        if !key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(crate::error::Error::InvalidConfig(format!(
                "storage.key '{key}' must be alphanumeric (plus '-' or '_')"
            )));
        }
        if self.storage.lock_timeout_ms == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "storage.lock_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.display.date_format.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "display.date_format cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
