//! Backend-specific error type.

use thiserror::Error;

/// Errors raised by a [`crate::SectorDatabase`] implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The embedded `sled` store reported a failure.
    #[cfg(feature = "sled-backend")]
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// An in-memory backend invariant was violated (should not happen in
    /// practice; kept for symmetry with a real disk backend's failure
    /// modes).
    #[error("in-memory backend error: {0}")]
    InMemory(String),
}
