//! The `SectorDatabase` consumed interface.

use crate::error::BackendError;
use crate::key::BackingKey;
use register_core::{AddressType, RegisterId, State};

/// Result type for backing-store operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// The durable key-value interface the register engine requires of its
/// backing store.
///
/// Named after the source ledger's `SectorDatabase`: a generic on-disk
/// record store the register database layers on top of. The register
/// engine never reaches past this trait — implementations are free to use
/// any on-disk format, as long as `read`/`write`/`erase`/`exists`/`index`
/// behave as specified here.
pub trait SectorDatabase: Send + Sync {
    /// Read the raw state stored at `key`, if any.
    fn read(&self, key: &BackingKey) -> Result<Option<State>>;

    /// Write `state` under `key`. `type_hint` is the address-type
    /// secondary-namespace string — implementations that support
    /// type-bounded iteration use it to route the write into the right
    /// namespace; implementations that don't care may ignore it.
    fn write(&self, key: BackingKey, state: State, type_hint: AddressType) -> Result<()>;

    /// Remove any entry stored at `key`. Erasing an absent key is not an
    /// error.
    fn erase(&self, key: &BackingKey) -> Result<()>;

    /// Whether `key` currently has an entry.
    fn exists(&self, key: &BackingKey) -> Result<bool>;

    /// Record a secondary index entry aliasing the `("genesis", secondary)`
    /// key to the `("state", primary)` key.
    ///
    /// After indexing, `read(&BackingKey::Genesis(secondary))` resolves
    /// through to whatever is currently stored at
    /// `BackingKey::State(primary)` — the index is a live alias, not a
    /// point-in-time copy, matching the source ledger's `Index()` call.
    fn index(&self, secondary: RegisterId, primary: RegisterId) -> Result<()>;
}
