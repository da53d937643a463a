//! Opaque register state.

use std::fmt;
use std::sync::Arc;

/// The opaque byte payload of a register.
///
/// `State` is compared and cloned by value but never interpreted by the
/// store — two states are equal iff their bytes are equal, full stop, no
/// schema-aware comparison. Bytes are held behind an `Arc<[u8]>` so that
/// overlay layers can clone a state into the commit/scope maps without
/// copying the payload.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct State(Arc<[u8]>);

impl State {
    /// Wrap an owned byte vector as a register state.
    pub fn new(bytes: Vec<u8>) -> Self {
        State(Arc::from(bytes))
    }

    /// The raw bytes of this state.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this state is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for State {
    fn from(bytes: Vec<u8>) -> Self {
        State::new(bytes)
    }
}

impl From<&[u8]> for State {
    fn from(bytes: &[u8]) -> Self {
        State(Arc::from(bytes))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State({} bytes)", self.0.len())
    }
}
