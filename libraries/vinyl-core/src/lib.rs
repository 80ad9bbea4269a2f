//! Vinyl Core
//!
//! Domain types and shared seams for the Vinyl playback engine.
//!
//! This crate provides the foundational building blocks used by both playback
//! surfaces (collaborative sessions and solo crate playback):
//! - **Domain Types**: `Track`, `Crate`, and their newtype ids
//! - **Time Seam**: the `Clock` trait that keeps cooldowns and timestamps
//!   deterministic under test
//!
//! # Example
//!
//! ```rust
//! use vinyl_core::types::{Crate, ListenerId, SourcePlatform, Track};
//!
//! let owner = ListenerId::generate();
//! let track = Track::new("Midnight Drive", "Nova Haze", "3:42", SourcePlatform::SoundCloud);
//!
//! let mut record_crate = Crate::new(owner, "Late Night Mix");
//! record_crate.add_track(track);
//! assert_eq!(record_crate.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use types::{Crate, CrateId, EntryId, ListenerId, SourcePlatform, Track, TrackId};
