//! Register identifiers and address types.

use std::fmt;

/// Byte width of a [`RegisterId`]. 256 bits, matching the source ledger's
/// `uint256_t` register addressing.
pub const REGISTER_ID_LEN: usize = 32;

/// The address type tag carried by every [`RegisterId`].
///
/// The type is observable and selects the per-type secondary key namespace
/// used when the id is written to the backing store. Reads never depend on
/// it — two ids that differ only in their type tag round-trip independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AddressType {
    /// A user or contract account register.
    Account = 0,
    /// An append-only register (e.g. a list/log object).
    Append = 1,
    /// A crypto-object register (keys, certificates).
    Crypto = 2,
    /// A name-service register.
    Name = 3,
    /// A namespace register.
    Namespace = 4,
    /// A generic object register.
    Object = 5,
    /// A raw, schema-less register.
    Raw = 6,
    /// A read-only register.
    Readonly = 7,
    /// A token-supply register.
    Token = 8,
    /// A trust/stake register, derived from a sig-chain genesis id.
    Trust = 9,
    /// Any byte value outside the known range. Maps to the `"NONE"`
    /// secondary-namespace hint.
    Unknown(u8),
}

impl AddressType {
    /// Decode the type tag byte embedded in a [`RegisterId`].
    fn from_tag(tag: u8) -> Self {
        match tag {
            0 => AddressType::Account,
            1 => AddressType::Append,
            2 => AddressType::Crypto,
            3 => AddressType::Name,
            4 => AddressType::Namespace,
            5 => AddressType::Object,
            6 => AddressType::Raw,
            7 => AddressType::Readonly,
            8 => AddressType::Token,
            9 => AddressType::Trust,
            other => AddressType::Unknown(other),
        }
    }

    fn tag(self) -> u8 {
        match self {
            AddressType::Account => 0,
            AddressType::Append => 1,
            AddressType::Crypto => 2,
            AddressType::Name => 3,
            AddressType::Namespace => 4,
            AddressType::Object => 5,
            AddressType::Raw => 6,
            AddressType::Readonly => 7,
            AddressType::Token => 8,
            AddressType::Trust => 9,
            AddressType::Unknown(other) => other,
        }
    }

    /// The secondary-key namespace hint passed to the backing store on
    /// writes. Unknown types map to the literal `"NONE"`.
    pub fn namespace(self) -> &'static str {
        match self {
            AddressType::Account => "account",
            AddressType::Append => "append",
            AddressType::Crypto => "crypto",
            AddressType::Name => "name",
            AddressType::Namespace => "namespace",
            AddressType::Object => "object",
            AddressType::Raw => "raw",
            AddressType::Readonly => "readonly",
            AddressType::Token => "token",
            AddressType::Trust => "trust",
            AddressType::Unknown(_) => "NONE",
        }
    }
}

/// A 256-bit register identifier with an embedded, observable address type.
///
/// The type tag occupies the final byte of the identifier, mirroring the
/// source ledger's addressing scheme. Equality and ordering compare the
/// full 32 bytes, so two ids with the same type but different payload
/// bytes are always distinct.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId([u8; REGISTER_ID_LEN]);

impl RegisterId {
    /// Build an id directly from its 32 raw bytes. The final byte is taken
    /// as the address-type tag.
    pub const fn from_bytes(bytes: [u8; REGISTER_ID_LEN]) -> Self {
        RegisterId(bytes)
    }

    /// The raw 32 bytes of this id.
    pub fn as_bytes(&self) -> &[u8; REGISTER_ID_LEN] {
        &self.0
    }

    /// The embedded address type.
    pub fn address_type(&self) -> AddressType {
        AddressType::from_tag(self.0[REGISTER_ID_LEN - 1])
    }

    /// A short hex prefix of this id, for log lines (e.g. a conflict
    /// warning naming the register that lost a commit race).
    pub fn short_prefix(&self) -> String {
        self.0[..4].iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Deterministically derive a register id from a namespace string, a
    /// seed id, and an address type, matching the source's
    /// `Address(strNamespace, hashSeed, nType)` constructor (used by
    /// `WriteTrust`/`ReadTrust` to derive the trust register from a
    /// sig-chain genesis id).
    pub fn derive(namespace: &str, seed: &RegisterId, ty: AddressType) -> Self {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(namespace.as_bytes());
        hasher.update(seed.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; REGISTER_ID_LEN];
        bytes.copy_from_slice(&digest[..REGISTER_ID_LEN]);
        bytes[REGISTER_ID_LEN - 1] = ty.tag();
        RegisterId(bytes)
    }
}

impl fmt::Debug for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegisterId({}..)", self.short_prefix())
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
