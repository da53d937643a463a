//! The conflict-logging seam.
//!
//! The source parses both sides of a conflicted erasure as a structured
//! object to print a `balance` field. That parsing is a diagnostic
//! dependency on the upstream object schema, which this store has no
//! business knowing about. `OnConflict` factors it out as an injectable
//! callback so `register-engine` never needs to know the payload schema —
//! the default implementation just logs the raw byte lengths via
//! `tracing`.

use register_core::{RegisterId, State};
use std::sync::Arc;

/// Called when `MemoryCommit` finds an erasure witness that disagrees
/// with the current `commit` value for the same id. The conflicting entry
/// is always skipped; this callback is purely for observability.
pub type OnConflict = Arc<dyn Fn(&RegisterId, &State, &State) + Send + Sync>;

/// The default conflict callback: a single `tracing::warn!` line with the
/// id prefix and both observed states' lengths, replacing the source's
/// `CONFLICTED STATE` + two `Balance (...)` debug lines.
pub fn default_on_conflict() -> OnConflict {
    Arc::new(|id, commit_state, witness_state| {
        tracing::warn!(
            register = %id.short_prefix(),
            commit_bytes = commit_state.len(),
            witness_bytes = witness_state.len(),
            "CONFLICTED STATE"
        );
    })
}
