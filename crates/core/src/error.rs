//! Error types for the register store.
//!
//! Only backing-store I/O can surface a failure to the caller. In-memory
//! tier operations (everything touching `commit`/`memory`/`miner`) never
//! fail, and scope-lifecycle calls (`MemoryBegin`/`MemoryRelease`/
//! `MemoryCommit`) are infallible — they return `()`, not `Result`.

use crate::id::RegisterId;
use std::error::Error as StdError;
use thiserror::Error;

/// Result type alias for fallible register-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the register store.
#[derive(Debug, Error)]
pub enum Error {
    /// No tier (scope, commit, or backing) holds the requested id.
    #[error("register not found: {0}")]
    NotFound(RegisterId),

    /// The backing store reported an I/O failure.
    #[error("backing store failure: {0}")]
    Backend(#[from] BackendFailure),
}

impl Error {
    /// Box up a backend-specific error as a [`BackendFailure`].
    pub fn backend(err: impl StdError + Send + Sync + 'static) -> Self {
        Error::Backend(BackendFailure(Box::new(err)))
    }
}

/// An opaque wrapper around whatever error type the configured
/// [`SectorDatabase`](register-backing equivalent) implementation raises.
///
/// Kept as a boxed trait object rather than a generic parameter so that
/// `register-core` does not need to depend on any particular backing-store
/// crate (sled, an in-memory map, or anything else).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct BackendFailure(Box<dyn StdError + Send + Sync>);
