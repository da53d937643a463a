//! The register store's three-tier visibility model.
//!
//! Three layers, leaves first:
//!
//! 1. [`register_backing::SectorDatabase`] — the durable backing store.
//! 2. [`commit::CommitOverlay`] — one mutex-guarded overlay shared by every
//!    thread, holding pending mempool writes.
//! 3. [`scope::ScopeOverlay`] — per-thread `memory`/`miner` overlays, each
//!    an [`overlay::Overlay`], layered above `commit`.
//!
//! [`store::RegisterStore`] is the public facade composing all three and
//! dispatching on [`register_core::Mode`].

#![warn(missing_docs)]

pub mod commit;
pub mod conflict;
pub mod overlay;
pub mod scope;
pub mod store;

pub use commit::CommitOverlay;
pub use conflict::OnConflict;
pub use overlay::Overlay;
pub use scope::{Scope, ScopeOverlay};
pub use store::RegisterStore;
