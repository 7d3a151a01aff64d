//! Channel store
//!
//! Persists the canonical channel set as a JSON array. Loads tolerate a
//! missing file (an empty set, for first runs); saves sort channels by
//! case-insensitive name and write atomically via a temp file rename so a
//! crashed run never leaves a half-written store behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{StorageError, StorageResult};
use crate::models::Channel;

/// JSON-file-backed channel store
pub struct ChannelStore {
    path: PathBuf,
}

impl ChannelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted channel set; a missing file is an empty set
    pub fn load(&self) -> StorageResult<Vec<Channel>> {
        if !self.path.exists() {
            debug!("Channel store {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let channels: Vec<Channel> = serde_json::from_str(&contents)?;
        debug!("Loaded {} channels from {}", channels.len(), self.path.display());
        Ok(channels)
    }

    /// Persist the channel set, sorted by case-insensitive name
    pub fn save(&self, channels: &[Channel]) -> StorageResult<()> {
        let mut sorted: Vec<&Channel> = channels.iter().collect();
        sorted.sort_by_key(|c| c.name.to_lowercase());

        let json = serde_json::to_string_pretty(&sorted)?;
        write_atomic(&self.path, json.as_bytes())?;
        debug!("Saved {} channels to {}", sorted.len(), self.path.display());
        Ok(())
    }
}

/// Write a file atomically: temp file in the target directory, then rename
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| StorageError::PersistFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}
