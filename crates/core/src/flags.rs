//! The mode flag that gates every register-store operation.

/// Selects which tiers of the three-tier visibility model participate in a
/// given call.
///
/// Every public operation on the register store takes a `Mode`. There is
/// no default: callers must say whether they are staging for the mempool,
/// scratch-mining, flushing a block, or erasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pre-commit mempool staging. Targets the thread's `memory` scope if
    /// one is open, else the shared `commit` overlay. Never touches the
    /// backing store.
    Mempool,
    /// Scratch mining workspace. Targets the thread's `miner` scope only;
    /// a no-op if no `miner` scope is open. Never touches `commit` or the
    /// backing store.
    Miner,
    /// Authoritative block application. Flushes matching `commit` entries
    /// and writes through to the backing store.
    Block,
    /// Like `Block`, but short-circuits before the backing-store call:
    /// an erase clears the overlay entry and drops straight through to the
    /// backing store without reconciling against `commit` first.
    Erase,
}
