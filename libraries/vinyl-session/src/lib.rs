//! Vinyl - Session Playback
//!
//! Collaborative DJ session engine for Vinyl.
//!
//! This crate provides:
//! - A shared, ordered track queue with per-listener add cooldowns
//! - One-vote-per-listener track voting with reject-on-repeat semantics
//! - Vote-driven auto-skip (downvote ratio or explicit skip-vote quorum)
//! - Host/follower queue-add permissions
//! - Tick-driven playback simulation shared with the crate player
//!
//! # Architecture
//!
//! `vinyl-session` is UI-agnostic and synchronous: every mutation happens
//! inside the calling event, the manager never owns a timer, and time
//! enters only through the injected [`vinyl_core::Clock`]. Thresholds are
//! derived from the live listener count and recomputed whenever it
//! changes.
//!
//! # Example
//!
//! ```rust
//! use vinyl_core::types::{ListenerId, SourcePlatform, Track};
//! use vinyl_session::{SessionConfig, SessionManager, VoteDirection};
//!
//! let host = ListenerId::generate();
//! let mut session = SessionManager::new(SessionConfig::default(), host.clone());
//! session.set_listener_count(4);
//!
//! let track = Track::new("Floor Filler", "DJ Nova", "4:12", SourcePlatform::Spotify);
//! let entry_id = session.add_track(track, &host).unwrap();
//! session.play().unwrap();
//!
//! // Listeners vote on the playing entry
//! let listener = ListenerId::generate();
//! session.vote(&entry_id, &listener, VoteDirection::Up).unwrap();
//! ```

mod cooldown;
mod error;
mod events;
mod history;
mod manager;
mod queue;
mod skip;
mod types;
mod vote;

// Public exports
pub use cooldown::TrackCooldownPolicy;
pub use error::{Result, SessionError};
pub use events::{SessionEvent, SkipReason};
pub use manager::SessionManager;
pub use skip::SkipThresholdPolicy;
pub use types::{
    EntryStatus, QueueEntry, QueuePermission, SessionConfig, VoteDirection, VoteTally,
};
pub use vote::VoteEngine;
