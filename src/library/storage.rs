// ListStore - JSON persistence for the playlist catalogue

use crate::playlist::types::Playlist;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported list store version {0}")]
    UnsupportedVersion(u32),
}

/// Document written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredLists {
    version: u32,
    saved_at: DateTime<Utc>,
    #[serde(default)]
    lists: Vec<Playlist>,
}

/// Reads and writes every playlist as one JSON file
#[derive(Debug, Clone)]
pub struct ListStore {
    path: PathBuf,
}

impl ListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all stored playlists
    ///
    /// A missing file is an empty catalogue, not an error.
    pub fn load(&self) -> Result<Vec<Playlist>, StorageError> {
        if !self.path.exists() {
            log::info!("No list store at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let json = std::fs::read_to_string(&self.path)?;
        let stored: StoredLists = serde_json::from_str(&json)?;
        if stored.version != STORE_FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion(stored.version));
        }

        log::info!(
            "Loaded {} playlists from {:?} (saved {})",
            stored.lists.len(),
            self.path,
            stored.saved_at.to_rfc3339()
        );
        Ok(stored.lists)
    }

    /// Overwrite the store with `lists`
    pub fn save(&self, lists: &[Playlist]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredLists {
            version: STORE_FORMAT_VERSION,
            saved_at: Utc::now(),
            lists: lists.to_vec(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;

        log::info!("Saved {} playlists to {:?}", lists.len(), self.path);
        Ok(())
    }
}
