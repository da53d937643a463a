//! Register store: a keyed persistent store with mempool/miner staging
//! overlays.
//!
//! Three crates, leaves first:
//!
//! - [`register_core`] — register ids, opaque state, the `Mode` flag, errors.
//! - [`register_backing`] — the durable `SectorDatabase` backing store.
//! - [`register_engine`] — the commit overlay, thread-local scopes, and the
//!   `RegisterStore` facade dispatching on `Mode`.
//!
//! This crate wires the three together behind [`RegisterStoreBuilder`] and
//! re-exports the types most callers need.

#![warn(missing_docs)]

pub use register_backing::InMemorySector;
pub use register_core::{AddressType, Error, Mode, RegisterId, Result, State};
pub use register_engine::{OnConflict, RegisterStore};

#[cfg(feature = "sled-backend")]
pub use register_backing::{SledConfig, SledSector};

use register_engine::conflict::default_on_conflict;

/// Builds a [`RegisterStore`] over a chosen backing implementation.
///
/// Mirrors the backing store's own constructor knobs (`buckets`,
/// `cache_mb`) plus the two engine-level overrides (`on_conflict`,
/// `trust_read_mode`), so a caller never has to reach into
/// `register-engine`/`register-backing` directly for ordinary setup.
pub struct RegisterStoreBuilder {
    buckets: usize,
    #[cfg(feature = "sled-backend")]
    cache_mb: u64,
    on_conflict: OnConflict,
    trust_read_mode: Mode,
}

impl Default for RegisterStoreBuilder {
    fn default() -> Self {
        RegisterStoreBuilder {
            buckets: 256,
            #[cfg(feature = "sled-backend")]
            cache_mb: 128,
            on_conflict: default_on_conflict(),
            trust_read_mode: Mode::Block,
        }
    }
}

impl RegisterStoreBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        RegisterStoreBuilder::default()
    }

    /// Initial shard-capacity hint for [`InMemorySector`]. Ignored by
    /// `build_sled`.
    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// `sled`'s in-memory page cache budget, in megabytes. Ignored by
    /// `build_in_memory`.
    #[cfg(feature = "sled-backend")]
    pub fn cache_mb(mut self, cache_mb: u64) -> Self {
        self.cache_mb = cache_mb;
        self
    }

    /// Override the conflict-logging callback invoked by `MemoryCommit`.
    pub fn on_conflict(mut self, callback: OnConflict) -> Self {
        self.on_conflict = callback;
        self
    }

    /// Fix the mode `ReadTrust` uses to consult overlays before falling
    /// back to the backing store.
    pub fn trust_read_mode(mut self, mode: Mode) -> Self {
        self.trust_read_mode = mode;
        self
    }

    /// Build a store over an ephemeral, in-process [`InMemorySector`].
    /// Infallible — there is no I/O to fail.
    pub fn build_in_memory(self) -> RegisterStore<InMemorySector> {
        RegisterStore::new(InMemorySector::new(self.buckets))
            .with_on_conflict(self.on_conflict)
            .with_trust_read_mode(self.trust_read_mode)
    }

    /// Build a store over a durable [`SledSector`] rooted at `path`,
    /// creating it if absent.
    #[cfg(feature = "sled-backend")]
    pub fn build_sled(self, path: impl AsRef<std::path::Path>) -> Result<RegisterStore<SledSector>> {
        let config = SledConfig {
            cache_mb: self.cache_mb,
        };
        let backing = SledSector::open(path, config).map_err(Error::backend)?;
        Ok(RegisterStore::new(backing)
            .with_on_conflict(self.on_conflict)
            .with_trust_read_mode(self.trust_read_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8, ty: u8) -> RegisterId {
        let mut bytes = [byte; 32];
        bytes[31] = ty;
        RegisterId::from_bytes(bytes)
    }

    /// Routes `tracing` output (e.g. the `MemoryCommit` conflict warning)
    /// to the test harness's captured stdout, so a failing assertion's
    /// surrounding log context is visible in `cargo test` output.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn default_builder_produces_a_working_in_memory_store() {
        init_tracing();
        let store = RegisterStoreBuilder::new().buckets(16).build_in_memory();
        let reg = id(1, 5);
        store
            .write(reg, State::from(b"v".as_slice()), Mode::Block)
            .unwrap();
        assert_eq!(store.read(reg, Mode::Block).unwrap().as_bytes(), b"v");
    }

    #[cfg(feature = "sled-backend")]
    #[test]
    fn sled_builder_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = RegisterStoreBuilder::new()
            .cache_mb(8)
            .build_sled(dir.path())
            .unwrap();
        let reg = id(2, 5);
        store
            .write(reg, State::from(b"durable".as_slice()), Mode::Block)
            .unwrap();
        assert_eq!(
            store.read(reg, Mode::Block).unwrap().as_bytes(),
            b"durable"
        );
    }
}
