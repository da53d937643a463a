//! A `sled`-backed, disk-durable `SectorDatabase`.
//!
//! Grounded on the pack's `kvdb-sled` adapter: a thin `KeyValueDB`-style
//! wrapper around a `sled::Db`, mapping a small typed interface onto
//! sled's tree API and turning `sled::Error` into this crate's
//! [`BackendError`]. Unlike `kvdb-sled`'s column-per-tree layout, the
//! register store only ever needs one flat keyspace (state keys and
//! genesis keys are already disjoint via [`BackingKey::encode`]'s tag
//! byte), so a single `sled::Tree` suffices.

use crate::error::BackendError;
use crate::key::BackingKey;
use crate::sector::{Result, SectorDatabase};
use register_core::{AddressType, RegisterId, State};
use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;

/// Construction parameters for [`SledSector`].
#[derive(Debug, Clone)]
pub struct SledConfig {
    /// `sled`'s in-memory page cache budget, in megabytes.
    pub cache_mb: u64,
}

impl Default for SledConfig {
    fn default() -> Self {
        SledConfig { cache_mb: 128 }
    }
}

/// Durable [`SectorDatabase`] backed by an embedded `sled` database.
pub struct SledSector {
    tree: sled::Db,
}

impl SledSector {
    /// Open (or create) a sled database at `path`.
    pub fn open(path: impl AsRef<Path>, config: SledConfig) -> Result<Self> {
        let db = sled::Config::default()
            .path(path.as_ref())
            .cache_capacity(config.cache_mb * MB)
            .open()
            .map_err(BackendError::from)?;
        Ok(SledSector { tree: db })
    }

    fn resolve_genesis(&self, genesis: &RegisterId) -> Result<Option<RegisterId>> {
        let key = BackingKey::Genesis(*genesis).encode();
        let Some(ivec) = self.tree.get(key).map_err(BackendError::from)? else {
            return Ok(None);
        };
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&ivec);
        Ok(Some(RegisterId::from_bytes(bytes)))
    }
}

impl SectorDatabase for SledSector {
    fn read(&self, key: &BackingKey) -> Result<Option<State>> {
        match key {
            BackingKey::State(_) => {
                let raw = self.tree.get(key.encode()).map_err(BackendError::from)?;
                Ok(raw.map(|ivec| State::from(ivec.as_ref())))
            }
            BackingKey::Genesis(genesis) => match self.resolve_genesis(genesis)? {
                Some(register) => self.read(&BackingKey::State(register)),
                None => Ok(None),
            },
        }
    }

    fn write(&self, key: BackingKey, state: State, _type_hint: AddressType) -> Result<()> {
        if !matches!(key, BackingKey::State(_)) {
            return Err(BackendError::InMemory(
                "direct writes to the genesis namespace are not supported; use index()".into(),
            ));
        }
        self.tree
            .insert(key.encode(), state.as_bytes())
            .map_err(BackendError::from)?;
        Ok(())
    }

    fn erase(&self, key: &BackingKey) -> Result<()> {
        self.tree.remove(key.encode()).map_err(BackendError::from)?;
        Ok(())
    }

    fn exists(&self, key: &BackingKey) -> Result<bool> {
        match key {
            BackingKey::State(_) => {
                Ok(self.tree.contains_key(key.encode()).map_err(BackendError::from)?)
            }
            BackingKey::Genesis(genesis) => Ok(self
                .tree
                .contains_key(BackingKey::Genesis(*genesis).encode())
                .map_err(BackendError::from)?),
        }
    }

    fn index(&self, secondary: RegisterId, primary: RegisterId) -> Result<()> {
        self.tree
            .insert(BackingKey::Genesis(secondary).encode(), primary.as_bytes())
            .map_err(BackendError::from)?;
        Ok(())
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

    #[test]
    fn write_then_read_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = SledSector::open(dir.path(), SledConfig::default()).unwrap();
        let key = BackingKey::State(id(1, 5));
        db.write(key, State::from(b"s1".as_slice()), AddressType::Object)
            .unwrap();
        assert_eq!(db.read(&key).unwrap().unwrap().as_bytes(), b"s1");
    }

    #[test]
    fn trust_index_aliases_to_the_register_state() {
        let dir = tempfile::tempdir().unwrap();
        let db = SledSector::open(dir.path(), SledConfig::default()).unwrap();
        let genesis = id(9, 0);
        let register = id(9, 9);
        db.write(
            BackingKey::State(register),
            State::from(b"v1".as_slice()),
            AddressType::Trust,
        )
        .unwrap();
        db.index(genesis, register).unwrap();
        assert!(db.exists(&BackingKey::Genesis(genesis)).unwrap());
        assert_eq!(
            db.read(&BackingKey::Genesis(genesis))
                .unwrap()
                .unwrap()
                .as_bytes(),
            b"v1"
        );
    }
}
