//! Per-thread `memory` and `miner` scopes.
//!
//! Each scope flavor is modeled as a thread-local optional owner of an
//! [`Overlay`] — absence means "no scope open on this thread". `Begin`
//! installs a fresh overlay, `Release`/`Commit` drop it. No locks are taken
//! anywhere in this module: a scope is invisible to every other thread by
//! construction.

use crate::overlay::Overlay;
use register_core::Mode;
use std::cell::RefCell;

thread_local! {
    static MEMORY: RefCell<Option<Overlay>> = const { RefCell::new(None) };
    static MINER: RefCell<Option<Overlay>> = const { RefCell::new(None) };
}

/// Selects which thread-local scope an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The `memory` scope (transaction-assembly staging).
    Memory,
    /// The `miner` scope (scratch mining workspace).
    Miner,
}

impl Scope {
    /// The scope a given [`Mode`] addresses for scope-lifecycle purposes:
    /// `MemoryBegin(MINER)` installs `miner`; every other flag installs
    /// `memory`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Miner => Scope::Miner,
            _ => Scope::Memory,
        }
    }

    fn cell(self) -> &'static std::thread::LocalKey<RefCell<Option<Overlay>>> {
        match self {
            Scope::Memory => &MEMORY,
            Scope::Miner => &MINER,
        }
    }
}

/// Operations on the calling thread's scope overlays.
///
/// A unit struct rather than an instance: scopes are genuinely
/// thread-local, not tied to any particular [`crate::RegisterStore`]
/// instance, matching the source's `thread_local` statics on `RegisterDB`.
pub struct ScopeOverlay;

impl ScopeOverlay {
    /// Install a fresh, empty overlay for `scope` on this thread. Any
    /// prior overlay of the same flavor is dropped silently — there is no
    /// nested-scope semantics.
    pub fn begin(scope: Scope) {
        scope.cell().with(|cell| *cell.borrow_mut() = Some(Overlay::new()));
        tracing::trace!(?scope, "scope begin");
    }

    /// Drop the overlay for `scope` on this thread, discarding all staged
    /// writes and erasures. Idempotent and non-blocking.
    pub fn release(scope: Scope) {
        scope.cell().with(|cell| *cell.borrow_mut() = None);
        tracing::trace!(?scope, "scope release");
    }

    /// Whether `scope` is currently open on this thread.
    pub fn is_open(scope: Scope) -> bool {
        scope.cell().with(|cell| cell.borrow().is_some())
    }

    /// Run `f` with mutable access to this thread's overlay for `scope`,
    /// if one is open.
    pub fn with_mut<R>(scope: Scope, f: impl FnOnce(&mut Overlay) -> R) -> Option<R> {
        scope.cell().with(|cell| cell.borrow_mut().as_mut().map(f))
    }

    /// Run `f` with shared access to this thread's overlay for `scope`, if
    /// one is open.
    pub fn with<R>(scope: Scope, f: impl FnOnce(&Overlay) -> R) -> Option<R> {
        scope.cell().with(|cell| cell.borrow().as_ref().map(f))
    }

    /// Take ownership of this thread's overlay for `scope`, leaving it
    /// empty (used by `MemoryCommit`, which always ends by dropping the
    /// `memory` scope).
    pub fn take(scope: Scope) -> Option<Overlay> {
        scope.cell().with(|cell| cell.borrow_mut().take())
    }
}
