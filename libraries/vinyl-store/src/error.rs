/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store error types
///
/// Only writes can fail; loads degrade to defaults instead of erroring
/// (a corrupt snapshot must never block the player from opening).
#[derive(Error, Debug)]
pub enum StoreError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No usable data directory on this device
    #[error("No data directory available")]
    NoDataDir,
}
