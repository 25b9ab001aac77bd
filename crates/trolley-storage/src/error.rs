//! Storage error types.
//!
//! Load-side problems are deliberately absent: loads fail soft to an empty
//! cart and are logged, never surfaced as errors. Only `save` can fail in a
//! way callers must see, because a failed save aborts a commit.

use thiserror::Error;

/// Snapshot persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the snapshot (or creating its directory) failed.
    #[error("Snapshot write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized. Should not happen for valid
    /// carts; kept explicit rather than panicking inside a commit.
    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No usable location for the snapshot file.
    #[error("No data directory available for the snapshot")]
    NoDataDir,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
