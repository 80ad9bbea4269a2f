//! Vinyl - Crate Playback
//!
//! Solo playback engine for Vinyl crates.
//!
//! This crate provides:
//! - Index navigation with wrap-around (sequential or shuffled)
//! - Shuffle planning (uniform Fisher-Yates permutation, repeated per loop)
//! - Tick-driven progress simulation (no real audio, no owned timers)
//! - Snapshot capture/restore for cross-navigation persistence
//!
//! # Architecture
//!
//! `vinyl-playback` is UI- and storage-agnostic:
//! - No timers: the owning view calls [`CratePlayer::tick`] on its own
//!   scheduler at [`ProgressConfig::tick_interval`]
//! - No storage: the view persists [`PlayerSnapshot`] after mutations
//!   (see `vinyl-store`)
//!
//! The same [`ProgressSimulator`] also drives collaborative sessions in
//! `vinyl-session`, so both surfaces advance playback identically.
//!
//! # Example
//!
//! ```rust
//! use vinyl_core::types::{Crate, ListenerId, SourcePlatform, Track};
//! use vinyl_playback::CratePlayer;
//!
//! let mut record_crate = Crate::new(ListenerId::generate(), "Evening Mix");
//! record_crate.add_track(Track::new("Intro", "Nova Haze", "2:10", SourcePlatform::SoundCloud));
//! record_crate.add_track(Track::new("Outro", "Nova Haze", "4:01", SourcePlatform::SoundCloud));
//!
//! let mut player = CratePlayer::default();
//! player.play_crate(record_crate, 0).unwrap();
//! player.set_shuffle(true);
//!
//! // The owning view drives playback on its tick schedule
//! player.tick();
//!
//! // ...and persists the pointer state after mutations
//! let snapshot = player.snapshot();
//! ```

mod error;
mod events;
mod player;
mod progress;
mod shuffle;

// Public exports
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use player::{CratePlayer, PlayerSnapshot};
pub use progress::{PlaybackState, ProgressConfig, ProgressSimulator, TickOutcome};
pub use shuffle::ShufflePlanner;
