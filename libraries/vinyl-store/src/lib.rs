//! Vinyl - Local Storage
//!
//! Local-device persistence for the Vinyl player.
//!
//! This crate provides:
//! - [`PersistedPlayerStore`]: the crate player's pointer state as one
//!   versioned, atomically written snapshot record (with per-field safe
//!   defaults and legacy per-key decoding on load)
//! - [`LocalCrateStore`]: the device-local crate list as a JSON array,
//!   loaded on startup and saved on every change
//!
//! Loads never fail: corruption is logged and degraded to defaults so a
//! bad snapshot can never block a view from opening. Writes go through a
//! temp-file-and-rename so a crash mid-write leaves a complete record.
//!
//! # Example
//!
//! ```rust,no_run
//! use vinyl_playback::CratePlayer;
//! use vinyl_store::PersistedPlayerStore;
//!
//! let store = PersistedPlayerStore::open_default().unwrap();
//!
//! // On startup: restore whatever survived the last session
//! let player = CratePlayer::restore(store.load(), Default::default());
//!
//! // After every mutation: persist the new pointer state
//! store.save(&player.snapshot()).unwrap();
//!
//! // When the user closes the player
//! store.clear().unwrap();
//! ```

mod crates_store;
mod error;
mod paths;
mod player_store;

// Public exports
pub use crates_store::LocalCrateStore;
pub use error::{Result, StoreError};
pub use paths::default_data_dir;
pub use player_store::PersistedPlayerStore;
