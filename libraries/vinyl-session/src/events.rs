//! Session events
//!
//! UI-facing notifications queued by the session manager and drained by
//! the owning view after each call.

use serde::{Deserialize, Serialize};
use vinyl_core::types::{EntryId, ListenerId, TrackId};

use crate::types::VoteTally;

/// Why a track was force-advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Downvote ratio crossed the auto-skip threshold
    Downvotes,

    /// Explicit skip votes reached the listener quorum
    SkipVotes,
}

/// Events emitted by the session engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A track was queued
    EntryAdded {
        /// The new entry
        entry_id: EntryId,
        /// Track inside the entry
        track_id: TrackId,
        /// Who queued it
        submitted_by: ListenerId,
    },

    /// A different entry became current
    TrackChanged {
        /// The now-playing entry
        entry_id: EntryId,
        /// Track inside the entry
        track_id: TrackId,
    },

    /// A vote landed on an entry
    VoteRecorded {
        /// The voted entry
        entry_id: EntryId,
        /// Updated aggregate
        tally: VoteTally,
    },

    /// A skip vote landed on the current track
    SkipVoteRecorded {
        /// Skip votes so far
        count: u32,
        /// Votes required to skip
        threshold: u32,
    },

    /// The current track was force-advanced
    TrackSkipped {
        /// The skipped entry
        entry_id: EntryId,
        /// What crossed the threshold
        reason: SkipReason,
    },

    /// An entry was removed from the queue
    EntryRemoved {
        /// The removed entry
        entry_id: EntryId,
    },

    /// No further ready entries; playback halted until the queue refills
    QueueExhausted,

    /// The live listener count changed
    ListenerCountChanged {
        /// New count
        count: u32,
    },
}
