//! Backing-store key namespace.
//!
//! State entries are keyed `("state", register-id)`; trust index entries
//! are keyed `("genesis", genesis-id)`. Both tags are folded into a single
//! byte-string key here so that every [`SectorDatabase`](crate::SectorDatabase)
//! implementation — sharded map or sled tree — can use one flat keyspace.

use register_core::RegisterId;

const STATE_TAG: u8 = b's';
const GENESIS_TAG: u8 = b'g';

/// A tagged key into the backing store: either a register state entry or
/// a genesis->trust index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackingKey {
    /// `("state", register-id)`
    State(RegisterId),
    /// `("genesis", genesis-id)`
    Genesis(RegisterId),
}

impl BackingKey {
    /// Flatten this key into the byte string used by the concrete backend.
    /// The tag byte is a prefix so that state and genesis keyspaces never
    /// collide even though both are addressed by a [`RegisterId`].
    pub fn encode(&self) -> [u8; 33] {
        let (tag, id) = match self {
            BackingKey::State(id) => (STATE_TAG, id),
            BackingKey::Genesis(id) => (GENESIS_TAG, id),
        };
        let mut buf = [0u8; 33];
        buf[0] = tag;
        buf[1..].copy_from_slice(id.as_bytes());
        buf
    }
}
