// Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "playlister";
const STORE_FILE: &str = "lists.json";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a playlister session
///
/// Every field is optional in the JSON file; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the playlist catalogue is stored
    pub storage_path: PathBuf,
    /// Maximum number of undoable edits kept (unbounded when absent)
    pub history_limit: Option<usize>,
    /// Log level spec passed to the logger (overridden by RUST_LOG)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            history_limit: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// `<data dir>/playlister/lists.json`, or `./lists.json` without a data dir
pub fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE))
}
