//! Local crate collection
//!
//! Crates that live only on this device are kept as one JSON array,
//! loaded on startup and rewritten on every change.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use vinyl_core::types::Crate;

use crate::error::{Result, StoreError};
use crate::paths::{default_data_dir, write_atomic};

/// File name under the data directory
const CRATES_FILE: &str = "crates.json";

/// Durable storage for the device-local crate list
#[derive(Debug, Clone)]
pub struct LocalCrateStore {
    path: PathBuf,
}

impl LocalCrateStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location
    pub fn open_default() -> Result<Self> {
        let dir = default_data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join(CRATES_FILE)))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all local crates
    ///
    /// A missing file is an empty collection; a corrupt file is logged
    /// and treated as empty rather than failing startup.
    pub fn load(&self) -> Vec<Crate> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "crate store unreadable");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(crates) => crates,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "crate store corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full crate list atomically
    pub fn save(&self, crates: &[Crate]) -> Result<()> {
        let contents = serde_json::to_string(crates)?;
        write_atomic(&self.path, &contents)?;
        Ok(())
    }
}
