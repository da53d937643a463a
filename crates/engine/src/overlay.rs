//! The overlay map: a pair of pending-write and erasure-witness maps.

use register_core::{RegisterId, State};
use rustc_hash::FxHashMap;

/// An in-memory staging map layered above the backing store.
///
/// `states` holds pending writes not yet visible to the backing store.
/// `erasures` holds, for a register staged for erase inside a scope, the
/// *prior committed* value observed at erase time — the "erasure witness"
/// used at `MemoryCommit` time to detect a race against a concurrent
/// writer.
#[derive(Debug, Default, Clone)]
pub struct Overlay {
    states: FxHashMap<RegisterId, State>,
    erasures: FxHashMap<RegisterId, State>,
}

impl Overlay {
    /// An empty overlay.
    pub fn new() -> Self {
        Overlay::default()
    }

    /// The pending state for `id`, if this overlay holds one.
    pub fn get(&self, id: &RegisterId) -> Option<&State> {
        self.states.get(id)
    }

    /// Whether this overlay holds a pending state for `id`.
    pub fn contains(&self, id: &RegisterId) -> bool {
        self.states.contains_key(id)
    }

    /// Stage a write. Staging a fresh write always clears any pending
    /// erasure witness for the same id first.
    pub fn put(&mut self, id: RegisterId, state: State) {
        self.erasures.remove(&id);
        self.states.insert(id, state);
    }

    /// Drop any pending write for `id`, returning it if present.
    pub fn remove_state(&mut self, id: &RegisterId) -> Option<State> {
        self.states.remove(id)
    }

    /// Record `witness` as the erasure witness for `id`.
    pub fn record_erasure(&mut self, id: RegisterId, witness: State) {
        self.erasures.insert(id, witness);
    }

    /// All pending writes, draining this overlay.
    pub fn drain_states(&mut self) -> Vec<(RegisterId, State)> {
        self.states.drain().collect()
    }

    /// All erasure witnesses, draining this overlay.
    pub fn drain_erasures(&mut self) -> Vec<(RegisterId, State)> {
        self.erasures.drain().collect()
    }

    /// Whether this overlay holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.erasures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> RegisterId {
        RegisterId::from_bytes([byte; 32])
    }

    #[test]
    fn put_clears_a_pending_erasure_witness() {
        let mut overlay = Overlay::new();
        overlay.record_erasure(id(1), State::from(b"old".as_slice()));
        overlay.put(id(1), State::from(b"new".as_slice()));
        assert_eq!(overlay.drain_erasures(), vec![]);
        assert_eq!(overlay.get(&id(1)).unwrap().as_bytes(), b"new");
    }

    #[test]
    fn fresh_overlay_is_empty() {
        assert!(Overlay::new().is_empty());
    }
}
