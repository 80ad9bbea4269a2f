//! Persisted crate-player state
//!
//! The player snapshot is written as one versioned JSON record, replacing
//! the historical seven independent storage keys. Loading decodes each
//! field on its own: a missing or corrupt field falls back to its safe
//! default without blocking the rest, and the legacy per-key layout
//! (primitive values string-encoded) decodes through the same path.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use vinyl_playback::PlayerSnapshot;

use crate::error::{Result, StoreError};
use crate::paths::{default_data_dir, write_atomic};

/// Current snapshot record version
const SNAPSHOT_VERSION: u32 = 1;

/// File name under the data directory
const PLAYER_FILE: &str = "player.json";

/// Durable storage for [`PlayerSnapshot`]
///
/// Writes are atomic; loads never fail. Call [`PersistedPlayerStore::save`]
/// after every player mutation and [`PersistedPlayerStore::clear`] when the
/// user closes the player.
#[derive(Debug, Clone)]
pub struct PersistedPlayerStore {
    path: PathBuf,
}

impl PersistedPlayerStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location
    pub fn open_default() -> Result<Self> {
        let dir = default_data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join(PLAYER_FILE)))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the full snapshot atomically
    pub fn save(&self, snapshot: &PlayerSnapshot) -> Result<()> {
        let mut record = serde_json::to_value(snapshot)?;
        record["version"] = SNAPSHOT_VERSION.into();
        write_atomic(&self.path, &record.to_string())?;
        Ok(())
    }

    /// Load the snapshot, degrading corrupt pieces to safe defaults
    ///
    /// A missing file, an unreadable file, or a non-object record all
    /// yield the default snapshot; a single bad field is logged and
    /// defaulted without touching its neighbors.
    pub fn load(&self) -> PlayerSnapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return PlayerSnapshot::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "player snapshot unreadable");
                return PlayerSnapshot::default();
            }
        };

        let record: Value = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "player snapshot is not valid JSON");
                return PlayerSnapshot::default();
            }
        };

        decode_snapshot(&record)
    }

    /// Delete the persisted snapshot (closing the player)
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Decode a snapshot record field by field
fn decode_snapshot(record: &Value) -> PlayerSnapshot {
    PlayerSnapshot {
        current_track: decode_field(record, "currentTrack"),
        is_playing: decode_flag(record, "isPlaying"),
        playing_crate: decode_field(record, "playingCrate"),
        current_track_index: decode_index(record, "currentTrackIndex"),
        is_shuffled: decode_flag(record, "isShuffled"),
        shuffled_indices: decode_field(record, "shuffledIndices"),
        is_player_minimized: decode_flag(record, "isPlayerMinimized"),
    }
}

/// Decode one field, defaulting on absence or corruption
///
/// The legacy layout stored complex values JSON-encoded inside a string,
/// so a string value gets a second decode attempt through its contents.
fn decode_field<T: DeserializeOwned + Default>(record: &Value, key: &str) -> T {
    match record.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(Value::String(inner)) => match serde_json::from_str(inner) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "discarding corrupt snapshot field");
                T::default()
            }
        },
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "discarding corrupt snapshot field");
                T::default()
            }
        },
    }
}

/// Decode a boolean, accepting the legacy `"true"`/`"false"` strings
fn decode_flag(record: &Value, key: &str) -> bool {
    match record.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s == "true",
        None | Some(Value::Null) => false,
        Some(other) => {
            warn!(key, value = %other, "discarding corrupt snapshot flag");
            false
        }
    }
}

/// Decode an index, accepting the legacy integer-string encoding
fn decode_index(record: &Value, key: &str) -> usize {
    match record.get(key) {
        Some(Value::Number(number)) => number.as_u64().unwrap_or(0) as usize,
        Some(Value::String(s)) => s.parse().unwrap_or_else(|_| {
            warn!(key, value = %s, "discarding corrupt snapshot index");
            0
        }),
        None | Some(Value::Null) => 0,
        Some(other) => {
            warn!(key, value = %other, "discarding corrupt snapshot index");
            0
        }
    }
}
