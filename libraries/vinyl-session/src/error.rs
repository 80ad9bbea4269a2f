//! Error types for session playback

use std::time::Duration;
use thiserror::Error;
use vinyl_core::types::EntryId;

/// Session errors
///
/// None of these are fatal; they surface as user notices and leave the
/// session state unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No further ready entries; playback halts until the queue refills
    #[error("Queue exhausted")]
    QueueExhausted,

    /// The listener already voted on this entry; the prior vote stands
    #[error("Already voted")]
    AlreadyVoted,

    /// The submitter must wait before adding another track
    #[error("Cooldown active: {} seconds remaining", remaining.as_secs())]
    CooldownActive {
        /// Time left until the submitter may add again
        remaining: Duration,
    },

    /// The session config does not allow this action for this listener
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// No entry with this id in the session
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// No track is currently playing
    #[error("Nothing is playing")]
    NothingPlaying,

    /// No previously played track to go back to
    #[error("No playback history")]
    HistoryEmpty,
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
