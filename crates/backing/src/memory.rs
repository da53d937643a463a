//! An in-process, sharded-map backing store.
//!
//! Grounded on the teacher's `ShardedStore` (`crates/storage/src/sharded.rs`):
//! a `DashMap` keyed by the flattened backing key gives lock-free reads and
//! per-key-shard writes, with no single global lock across the whole
//! keyspace. Bytes never leave the process, so this implementation is
//! useful for tests and for ephemeral (non-persistent) deployments — it
//! does not itself survive a restart.

use crate::error::BackendError;
use crate::key::BackingKey;
use crate::sector::{Result, SectorDatabase};
use dashmap::DashMap;
use register_core::{AddressType, RegisterId, State};

/// In-memory [`SectorDatabase`] backed by a sharded hash map.
pub struct InMemorySector {
    states: DashMap<[u8; 33], State>,
    /// genesis-id -> register-id alias table for `IndexTrust`/`ReadTrust`.
    trust_index: DashMap<RegisterId, RegisterId>,
}

impl InMemorySector {
    /// Create an empty store. `buckets` sizes the map's initial shard
    /// capacity hint; it does not bound the store's eventual size.
    pub fn new(buckets: usize) -> Self {
        InMemorySector {
            states: DashMap::with_capacity(buckets),
            trust_index: DashMap::new(),
        }
    }
}

impl Default for InMemorySector {
    fn default() -> Self {
        InMemorySector::new(256)
    }
}

impl SectorDatabase for InMemorySector {
    fn read(&self, key: &BackingKey) -> Result<Option<State>> {
        match key {
            BackingKey::State(_) => Ok(self.states.get(&key.encode()).map(|v| v.clone())),
            BackingKey::Genesis(genesis) => {
                let Some(register) = self.trust_index.get(genesis).map(|v| *v) else {
                    return Ok(None);
                };
                self.read(&BackingKey::State(register))
            }
        }
    }

    fn write(&self, key: BackingKey, state: State, _type_hint: AddressType) -> Result<()> {
        if !matches!(key, BackingKey::State(_)) {
            return Err(BackendError::InMemory(
                "direct writes to the genesis namespace are not supported; use index()".into(),
            ));
        }
        self.states.insert(key.encode(), state);
        Ok(())
    }

    fn erase(&self, key: &BackingKey) -> Result<()> {
        match key {
            BackingKey::State(_) => {
                self.states.remove(&key.encode());
            }
            BackingKey::Genesis(genesis) => {
                self.trust_index.remove(genesis);
            }
        }
        Ok(())
    }

    fn exists(&self, key: &BackingKey) -> Result<bool> {
        match key {
            BackingKey::State(_) => Ok(self.states.contains_key(&key.encode())),
            // Existence of the index entry itself, independent of whether
            // the aliased state has since been erased.
            BackingKey::Genesis(genesis) => Ok(self.trust_index.contains_key(genesis)),
        }
    }

    fn index(&self, secondary: RegisterId, primary: RegisterId) -> Result<()> {
        self.trust_index.insert(secondary, primary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use register_core::AddressType as At;

    fn id(byte: u8, ty: u8) -> RegisterId {
        let mut bytes = [byte; 32];
        bytes[31] = ty;
        RegisterId::from_bytes(bytes)
    }

    #[test]
    fn write_then_read_round_trips() {
        let db = InMemorySector::default();
        let key = BackingKey::State(id(1, 5));
        db.write(key, State::from(b"s1".as_slice()), At::Object)
            .unwrap();
        assert_eq!(db.read(&key).unwrap().unwrap().as_bytes(), b"s1");
    }

    #[test]
    fn erase_is_idempotent() {
        let db = InMemorySector::default();
        let key = BackingKey::State(id(2, 5));
        db.write(key, State::from(b"s".as_slice()), At::Object)
            .unwrap();
        db.erase(&key).unwrap();
        db.erase(&key).unwrap();
        assert!(!db.exists(&key).unwrap());
    }

    #[test]
    fn genesis_index_is_a_live_alias() {
        let db = InMemorySector::default();
        let genesis = id(9, 0);
        let register = id(9, 9);
        db.write(
            BackingKey::State(register),
            State::from(b"v1".as_slice()),
            At::Trust,
        )
        .unwrap();
        db.index(genesis, register).unwrap();

        assert_eq!(
            db.read(&BackingKey::Genesis(genesis)).unwrap().unwrap().as_bytes(),
            b"v1"
        );

        db.write(
            BackingKey::State(register),
            State::from(b"v2".as_slice()),
            At::Trust,
        )
        .unwrap();
        assert_eq!(
            db.read(&BackingKey::Genesis(genesis)).unwrap().unwrap().as_bytes(),
            b"v2"
        );
    }
}
