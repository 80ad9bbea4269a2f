/// Crate domain type
use crate::types::{CrateId, ListenerId, Track};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-curated, ordered track collection
///
/// Crates are played solo (or by invited collaborators) — no voting, no
/// submission metadata, just tracks in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crate {
    /// Unique crate identifier
    pub id: CrateId,

    /// Crate name
    pub name: String,

    /// Owner listener ID
    pub owner: ListenerId,

    /// Listeners invited to edit this crate
    pub collaborators: Vec<ListenerId>,

    /// Ordered tracks
    pub tracks: Vec<Track>,

    /// Whether the crate is publicly visible
    pub is_public: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Crate {
    /// Create a new private, empty crate
    pub fn new(owner: ListenerId, name: impl Into<String>) -> Self {
        Self {
            id: CrateId::generate(),
            name: name.into(),
            owner,
            collaborators: Vec::new(),
            tracks: Vec::new(),
            is_public: false,
            created_at: Utc::now(),
        }
    }

    /// Append a track to the crate
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the track at `index`
    ///
    /// Returns the removed track, or `None` if the index is out of bounds
    pub fn remove_track(&mut self, index: usize) -> Option<Track> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    /// Track at `index`
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of tracks in the crate
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the crate has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether `listener` may modify this crate (owner or collaborator)
    pub fn can_edit(&self, listener: &ListenerId) -> bool {
        self.owner == *listener || self.collaborators.contains(listener)
    }
}
