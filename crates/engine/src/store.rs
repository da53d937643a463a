//! The public register-store facade.
//!
//! [`RegisterStore`] composes the backing store, the shared `commit`
//! overlay, and the per-thread `memory`/`miner` scopes, and dispatches
//! every operation on a [`Mode`] flag.

use crate::commit::CommitOverlay;
use crate::conflict::{default_on_conflict, OnConflict};
use crate::scope::{Scope, ScopeOverlay};
use register_backing::{BackingKey, SectorDatabase};
use register_core::{AddressType, Error, Mode, RegisterId, Result, State};

/// The namespace string passed to the trust-register derivation,
/// matching the source's `Address(std::string("trust"), ...)` call.
const TRUST_NAMESPACE: &str = "trust";

/// The three-tier register store.
///
/// `D` is the backing-store implementation (an in-memory sharded map, a
/// `sled`-backed store, or any other [`SectorDatabase`]). The commit
/// overlay and scope lifecycle are identical regardless of backend.
pub struct RegisterStore<D: SectorDatabase> {
    backing: D,
    commit: CommitOverlay,
    on_conflict: OnConflict,
    /// The mode consulted by `ReadTrust` when deciding which overlay tier
    /// to check before falling back to the backing store. Fixed at
    /// construction — see DESIGN.md for why this is a builder-time setting
    /// rather than a per-call parameter.
    trust_read_mode: Mode,
}

impl<D: SectorDatabase> RegisterStore<D> {
    /// Wire up a store over `backing`, using the default conflict logger
    /// and `Mode::Block` as the trust-read mode.
    pub fn new(backing: D) -> Self {
        RegisterStore {
            backing,
            commit: CommitOverlay::new(),
            on_conflict: default_on_conflict(),
            trust_read_mode: Mode::Block,
        }
    }

    /// Override the conflict-logging callback.
    pub fn with_on_conflict(mut self, callback: OnConflict) -> Self {
        self.on_conflict = callback;
        self
    }

    /// Override the fixed mode `ReadTrust` uses to consult overlays.
    pub fn with_trust_read_mode(mut self, mode: Mode) -> Self {
        self.trust_read_mode = mode;
        self
    }

    /// Direct access to the backing store, for callers that need it (e.g.
    /// tests asserting on-disk state).
    pub fn backing(&self) -> &D {
        &self.backing
    }

    // ---------------------------------------------------------------
    // Write
    // ---------------------------------------------------------------

    /// Write `state` for `id` under `mode`.
    pub fn write(&self, id: RegisterId, state: State, mode: Mode) -> Result<()> {
        match mode {
            Mode::Mempool => {
                let handled = ScopeOverlay::with_mut(Scope::Memory, |overlay| {
                    overlay.put(id, state.clone());
                })
                .is_some();
                if !handled {
                    self.commit.put(id, state);
                }
                Ok(())
            }
            Mode::Miner => {
                // No-op, and no error, if no miner scope is open.
                ScopeOverlay::with_mut(Scope::Miner, |overlay| {
                    overlay.put(id, state.clone());
                });
                Ok(())
            }
            Mode::Block | Mode::Erase => {
                self.flush_matching_commit_entry(id, &state, mode);
                if mode == Mode::Erase {
                    return Ok(());
                }
                self.backing
                    .write(BackingKey::State(id), state, id.address_type())
                    .map_err(Error::backend)
            }
        }
    }

    /// The BLOCK/ERASE commit-mutex cleanup shared by `write` and `erase`:
    /// if `commit` holds `id`, and (for BLOCK) its value equals `witness`,
    /// stage an erasure witness in `memory` if one is open, else remove
    /// the entry from `commit` directly. For ERASE the equality check is
    /// skipped — any matching `commit` entry is cleaned up unconditionally.
    fn flush_matching_commit_entry(&self, id: RegisterId, witness: &State, mode: Mode) {
        self.commit.with_lock(|overlay| {
            if let Some(current) = overlay.get(&id).cloned() {
                let should_clean = mode == Mode::Erase || &current == witness;
                if should_clean {
                    let staged = ScopeOverlay::with_mut(Scope::Memory, |memory| {
                        memory.remove_state(&id);
                        memory.record_erasure(id, witness.clone());
                    })
                    .is_some();
                    if !staged {
                        overlay.remove_state(&id);
                    }
                }
            }
        });
    }

    // ---------------------------------------------------------------
    // Read
    // ---------------------------------------------------------------

    /// Read the effective state for `id` under `mode`.
    pub fn read(&self, id: RegisterId, mode: Mode) -> Result<State> {
        if let Some(state) = self.read_overlay(id, mode) {
            return Ok(state);
        }
        self.backing
            .read(&BackingKey::State(id))
            .map_err(Error::backend)?
            .ok_or(Error::NotFound(id))
    }

    /// The overlay-only portion of a read: `memory`/`commit` for MEMPOOL,
    /// `miner` only for MINER, nothing for BLOCK/ERASE/other.
    fn read_overlay(&self, id: RegisterId, mode: Mode) -> Option<State> {
        match mode {
            Mode::Mempool => {
                if let Some(state) = ScopeOverlay::with(Scope::Memory, |o| o.get(&id).cloned())
                    .flatten()
                {
                    return Some(state);
                }
                self.commit.get(&id)
            }
            Mode::Miner => ScopeOverlay::with(Scope::Miner, |o| o.get(&id).cloned()).flatten(),
            Mode::Block | Mode::Erase => None,
        }
    }

    // ---------------------------------------------------------------
    // Erase
    // ---------------------------------------------------------------

    /// Erase `id` under `mode`.
    pub fn erase(&self, id: RegisterId, mode: Mode) -> Result<()> {
        match mode {
            Mode::Mempool => {
                let has_scope = ScopeOverlay::with_mut(Scope::Memory, |memory| {
                    memory.remove_state(&id);
                    if let Some(current) = self.commit.get(&id) {
                        memory.record_erasure(id, current);
                    }
                })
                .is_some();
                if !has_scope {
                    self.commit.remove(&id);
                }
                Ok(())
            }
            Mode::Miner => {
                ScopeOverlay::with_mut(Scope::Miner, |miner| {
                    miner.remove_state(&id);
                });
                Ok(())
            }
            Mode::Block | Mode::Erase => {
                self.commit.with_lock(|overlay| {
                    if let Some(current) = overlay.get(&id).cloned() {
                        let staged = ScopeOverlay::with_mut(Scope::Memory, |memory| {
                            memory.remove_state(&id);
                            memory.record_erasure(id, current.clone());
                        })
                        .is_some();
                        if !staged {
                            overlay.remove_state(&id);
                        }
                    }
                });
                if mode == Mode::Erase {
                    return Ok(());
                }
                self.backing
                    .erase(&BackingKey::State(id))
                    .map_err(Error::backend)
            }
        }
    }

    // ---------------------------------------------------------------
    // Has
    // ---------------------------------------------------------------

    /// Whether `id` has a value reachable under `mode`.
    pub fn has(&self, id: RegisterId, mode: Mode) -> Result<bool> {
        if self.read_overlay_or_commit_presence(id, mode) {
            return Ok(true);
        }
        self.backing.exists(&BackingKey::State(id)).map_err(Error::backend)
    }

    fn read_overlay_or_commit_presence(&self, id: RegisterId, mode: Mode) -> bool {
        match mode {
            Mode::Mempool => {
                let in_memory =
                    ScopeOverlay::with(Scope::Memory, |o| o.contains(&id)).unwrap_or(false);
                in_memory || self.commit.contains(&id)
            }
            Mode::Miner => ScopeOverlay::with(Scope::Miner, |o| o.contains(&id)).unwrap_or(false),
            Mode::Block | Mode::Erase => false,
        }
    }

    // ---------------------------------------------------------------
    // Trust index operations
    // ---------------------------------------------------------------

    /// Add a `genesis -> state(register)` secondary index entry.
    pub fn index_trust(&self, genesis: RegisterId, register: RegisterId) -> Result<()> {
        self.backing.index(genesis, register).map_err(Error::backend)
    }

    /// Whether a trust index entry exists for `genesis`.
    pub fn has_trust(&self, genesis: RegisterId) -> Result<bool> {
        self.backing
            .exists(&BackingKey::Genesis(genesis))
            .map_err(Error::backend)
    }

    /// Persist the authoritative on-chain trust register for `genesis`,
    /// dropping any speculative `commit` entry for the derived register
    /// first.
    pub fn write_trust(&self, genesis: RegisterId, state: State) -> Result<()> {
        let register = Self::trust_register(genesis);
        self.commit.remove(&register);
        self.write(register, state, Mode::Block)
    }

    /// Read the trust state for `genesis`.
    ///
    /// Overlays are consulted using the store's fixed `trust_read_mode`;
    /// the backing-store fallback reads through the `genesis` key, not the
    /// derived `state` key, matching the source.
    pub fn read_trust(&self, genesis: RegisterId) -> Result<State> {
        let register = Self::trust_register(genesis);
        if let Some(state) = self.read_overlay(register, self.trust_read_mode) {
            return Ok(state);
        }
        self.backing
            .read(&BackingKey::Genesis(genesis))
            .map_err(Error::backend)?
            .ok_or(Error::NotFound(register))
    }

    /// Erase the `genesis` index entry. The derived register's state
    /// entry is intentionally left untouched — confirmed against the
    /// source, see DESIGN.md.
    pub fn erase_trust(&self, genesis: RegisterId) -> Result<()> {
        self.backing
            .erase(&BackingKey::Genesis(genesis))
            .map_err(Error::backend)
    }

    fn trust_register(genesis: RegisterId) -> RegisterId {
        RegisterId::derive(TRUST_NAMESPACE, &genesis, AddressType::Trust)
    }

    // ---------------------------------------------------------------
    // Scope lifecycle
    // ---------------------------------------------------------------

    /// Install a fresh `memory` or `miner` overlay on this thread.
    pub fn memory_begin(&self, mode: Mode) {
        ScopeOverlay::begin(Scope::for_mode(mode));
    }

    /// Drop this thread's overlay for the scope `mode` addresses,
    /// discarding all staged writes and erasures.
    pub fn memory_release(&self, mode: Mode) {
        ScopeOverlay::release(Scope::for_mode(mode));
    }

    /// Merge the `memory` scope into `commit`, detecting and skipping
    /// conflicted erasures. A no-op if no `memory` scope is open. `miner`
    /// is never committed.
    pub fn memory_commit(&self) {
        let Some(mut staged) = ScopeOverlay::take(Scope::Memory) else {
            return;
        };

        self.commit.with_lock(|overlay| {
            for (id, state) in staged.drain_states() {
                overlay.put(id, state);
            }

            for (id, witness) in staged.drain_erasures() {
                match overlay.get(&id).cloned() {
                    Some(current) if current == witness => {
                        overlay.remove_state(&id);
                        tracing::debug!(register = %id.short_prefix(), "ERASING entry");
                    }
                    Some(current) => {
                        (self.on_conflict)(&id, &current, &witness);
                    }
                    None => {}
                }
            }
        });
    }
}
