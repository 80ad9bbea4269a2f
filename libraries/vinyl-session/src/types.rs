//! Core types for session playback

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vinyl_core::types::{EntryId, ListenerId, Track};

/// A track inside a session queue
///
/// Wraps the immutable [`Track`] with its submission and voting metadata.
/// Owned exclusively by the session that queued it; removed when played or
/// explicitly deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Unique entry identifier (distinct from the track id)
    pub id: EntryId,

    /// The queued track
    pub track: Track,

    /// Listener who queued the track
    pub submitted_by: ListenerId,

    /// Readiness of the entry for playback
    pub status: EntryStatus,

    /// Vote aggregate for display
    pub votes: VoteTally,

    /// Engine time the entry was submitted
    pub submitted_at: Duration,
}

impl QueueEntry {
    /// Create a fresh entry with zero votes, ready to play
    pub fn new(track: Track, submitted_by: ListenerId, submitted_at: Duration) -> Self {
        Self {
            id: EntryId::generate(),
            track,
            submitted_by,
            status: EntryStatus::Ready,
            votes: VoteTally::default(),
            submitted_at,
        }
    }
}

/// Readiness of a queue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Playable
    Ready,

    /// Still resolving with the provider
    Buffering,

    /// Resolution failed; never playable
    Error,
}

impl EntryStatus {
    /// Convert status to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Ready => "ready",
            EntryStatus::Buffering => "buffering",
            EntryStatus::Error => "error",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ready" => Some(EntryStatus::Ready),
            "buffering" => Some(EntryStatus::Buffering),
            "error" => Some(EntryStatus::Error),
            _ => None,
        }
    }
}

/// Direction of a track vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// Upvote
    Up,
    /// Downvote
    Down,
}

/// Aggregated vote counts for one entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Number of upvotes
    pub up: u32,

    /// Number of downvotes
    pub down: u32,
}

impl VoteTally {
    /// Total votes cast
    pub fn total(&self) -> u32 {
        self.up + self.down
    }
}

/// Who may add tracks to the session queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePermission {
    /// Any listener in the session
    Anyone,

    /// The host and their followers
    Followers,

    /// The host alone
    HostOnly,
}

/// Configuration for a session
///
/// Supplied read-only by the room settings; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Who may queue tracks (default: anyone)
    pub queue_permission: QueuePermission,

    /// Minimum seconds between adds per listener (default: 0 = no cooldown)
    pub cooldown_seconds: u64,

    /// Downvote percentage (0-100) that force-skips a track (default: 50)
    pub auto_skip_threshold: u8,

    /// Whether the session is invite-only
    pub is_private: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            queue_permission: QueuePermission::Anyone,
            cooldown_seconds: 0,
            auto_skip_threshold: 50,
            is_private: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinyl_core::types::SourcePlatform;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.queue_permission, QueuePermission::Anyone);
        assert_eq!(config.cooldown_seconds, 0);
        assert_eq!(config.auto_skip_threshold, 50);
        assert!(!config.is_private);
    }

    #[test]
    fn new_entry_is_ready_with_zero_votes() {
        let track = Track::new("Song", "Artist", "2:45", SourcePlatform::Spotify);
        let entry = QueueEntry::new(track, ListenerId::new("l1"), Duration::from_secs(5));

        assert_eq!(entry.status, EntryStatus::Ready);
        assert_eq!(entry.votes, VoteTally::default());
        assert_eq!(entry.votes.total(), 0);
        assert_eq!(entry.submitted_at, Duration::from_secs(5));
    }

    #[test]
    fn entry_ids_unique_per_submission() {
        let track = Track::new("Song", "Artist", "2:45", SourcePlatform::Spotify);
        let a = QueueEntry::new(track.clone(), ListenerId::new("l1"), Duration::ZERO);
        let b = QueueEntry::new(track, ListenerId::new("l1"), Duration::ZERO);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_string_conversion() {
        assert_eq!(EntryStatus::Ready.as_str(), "ready");
        assert_eq!(EntryStatus::from_str("buffering"), Some(EntryStatus::Buffering));
        assert_eq!(EntryStatus::from_str("unknown"), None);
    }
}
