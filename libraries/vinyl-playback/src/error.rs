//! Error types for crate playback

use thiserror::Error;

/// Crate player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No crate is currently loaded
    #[error("No crate loaded")]
    NoCrateLoaded,

    /// The crate has no tracks to play
    #[error("Crate is empty")]
    EmptyCrate,

    /// Crate ran out of playable tracks
    #[error("End of crate")]
    EndOfCrate,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
