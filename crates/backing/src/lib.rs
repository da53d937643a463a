//! The backing key-value store consumed by the register engine.
//!
//! This crate is the durable leaf of the register store: a
//! `(tag, id) -> State` map exposing read/write/erase/exists/index, plus
//! the address-type secondary-key namespace hinting used for type-bounded
//! iteration.
//!
//! The register engine treats this crate as an external collaborator — it
//! is specified only via the [`SectorDatabase`] trait. Two implementations
//! ship here: [`memory::InMemorySector`] (an in-process sharded map, used
//! in tests and for ephemeral stores) and, behind the `sled-backend`
//! feature, [`sled_backend::SledSector`] (durable across process restarts).

#![warn(missing_docs)]

pub mod error;
pub mod key;
pub mod memory;
pub mod sector;

#[cfg(feature = "sled-backend")]
pub mod sled_backend;

pub use error::BackendError;
pub use key::BackingKey;
pub use memory::InMemorySector;
pub use sector::SectorDatabase;

#[cfg(feature = "sled-backend")]
pub use sled_backend::SledSector;
