//! Player events
//!
//! Event-based communication for UI synchronization. The player queues
//! events on every mutation; the owning view drains them with
//! `take_events` after each call.

use serde::{Deserialize, Serialize};
use vinyl_core::types::{CrateId, TrackId};

use crate::progress::PlaybackState;

/// Events emitted by the crate player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport state changed (playing, paused, stopped)
    StateChanged {
        /// The new transport state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new current track
        track_id: TrackId,
        /// Index of the track within the crate
        index: usize,
    },

    /// A crate was loaded for playback
    CrateOpened {
        /// ID of the opened crate
        crate_id: CrateId,
    },

    /// Playback ran out of tracks; progress is pinned at 100
    CrateEnded,

    /// Shuffle was toggled
    ShuffleChanged {
        /// Whether shuffle is now active
        enabled: bool,
    },

    /// The player was minimized or restored
    MinimizedChanged {
        /// Whether the player is now minimized
        minimized: bool,
    },

    /// The player was closed and its state cleared
    Closed,
}
