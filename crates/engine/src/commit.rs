//! The shared `commit` overlay.
//!
//! A single process-wide [`Overlay`] protected by one `parking_lot::Mutex`,
//! matching the teacher's per-branch commit lock in
//! `crates/concurrency/src/manager.rs` — except the register store has no
//! branch concept, so there is exactly one lock for the whole process
//! (`MEMORY_MUTEX` in the source).
//!
//! Every helper here takes the lock for the shortest span that does the
//! mapping work and releases it immediately; none of them perform
//! backing-store I/O while holding it.

use crate::overlay::Overlay;
use parking_lot::Mutex;
use register_core::{RegisterId, State};

/// The mutex-guarded `commit` overlay shared by every thread.
#[derive(Default)]
pub struct CommitOverlay {
    inner: Mutex<Overlay>,
}

impl CommitOverlay {
    /// A fresh, empty commit overlay.
    pub fn new() -> Self {
        CommitOverlay::default()
    }

    /// Read the pending state for `id`, if `commit` holds one.
    pub fn get(&self, id: &RegisterId) -> Option<State> {
        self.inner.lock().get(id).cloned()
    }

    /// Whether `commit` holds a pending state for `id`.
    pub fn contains(&self, id: &RegisterId) -> bool {
        self.inner.lock().contains(id)
    }

    /// Unconditionally set `commit.states[id] = state`.
    pub fn put(&self, id: RegisterId, state: State) {
        self.inner.lock().put(id, state);
    }

    /// Unconditionally drop any pending write for `id`.
    pub fn remove(&self, id: &RegisterId) {
        self.inner.lock().remove_state(id);
    }

    /// Run `f` with exclusive access to the underlying overlay. Used by
    /// the store facade for compound check-then-act sequences (e.g. "if
    /// commit holds `id` with value equal to `state`, remove it").
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Overlay) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> RegisterId {
        RegisterId::from_bytes([byte; 32])
    }

    #[test]
    fn put_then_get_round_trips() {
        let commit = CommitOverlay::new();
        commit.put(id(1), State::from(b"s".as_slice()));
        assert_eq!(commit.get(&id(1)).unwrap().as_bytes(), b"s");
    }

    #[test]
    fn remove_after_put_leaves_nothing() {
        let commit = CommitOverlay::new();
        commit.put(id(1), State::from(b"s".as_slice()));
        commit.remove(&id(1));
        assert!(!commit.contains(&id(1)));
    }
}
