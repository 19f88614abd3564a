//! Fixed-width value types used throughout the ledger.
//!
//! Every operand crossing the ledger boundary has a fixed byte width and
//! is a newtype to prevent misuse at compile time. Wrong-width input is
//! rejected at construction, before it can reach any state transition.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// serde support for byte arrays wider than the 32-element derive limit.
mod wide_bytes {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ser.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D, const N: usize>(de: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WideVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for WideVisitor<N> {
            type Value = [u8; N];

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a byte string of length {}", N)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.try_into().map_err(|_| E::invalid_length(v.len(), &self))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut out = [0u8; N];
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                Ok(out)
            }
        }

        de.deserialize_bytes(WideVisitor::<N>)
    }
}

/// An opaque 32-byte operand: names, roles, dates, expiry tokens.
///
/// The ledger never interprets the contents. Callers map application
/// data into 32 bytes, typically UTF-8 left-justified and zero-padded
/// (see [`Bytes32::from_text`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bytes32(pub [u8; 32]);

impl Bytes32 {
    /// Create a new operand from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// UTF-8 text, left-justified and zero-padded to 32 bytes.
    ///
    /// Fails if the text is longer than 32 bytes.
    pub fn from_text(s: &str) -> Result<Self, CoreError> {
        let raw = s.as_bytes();
        if raw.len() > 32 {
            return Err(CoreError::ValueTooLong {
                what: "operand text",
                max: 32,
                got: raw.len(),
            });
        }
        let mut out = [0u8; 32];
        out[..raw.len()].copy_from_slice(raw);
        Ok(Self(out))
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The all-zero operand.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Bytes32 {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "operand",
            expected: 32,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Content-addressed identifier of a parent identity NFT.
///
/// Computed as a persistent hash over the three identity operands; equal
/// inputs give the same id on any machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NftId(pub [u8; 32]);

impl NftId {
    /// Create a new NftId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NftId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for NftId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for NftId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for NftId {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "nft id",
            expected: 32,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Unlinkable identifier of a child.
///
/// Computed as a persistent hash over the child operands plus the evolved
/// ledger nonce, so repeat derivations from the same personal fields do
/// not correlate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId(pub [u8; 32]);

impl ChildId {
    /// Create a new ChildId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChildId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for ChildId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for ChildId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ChildId {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "child id",
            expected: 32,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// The ledger's evolving secret nonce.
///
/// Seeded at genesis, advanced only by child-id derivation. Debug output
/// never prints the value.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nonce(pub [u8; 32]);

impl Nonce {
    /// Create a new nonce from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Fresh nonce seed from the OS entropy source.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce(..)")
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "nonce",
            expected: 32,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Opaque 128-byte content address of an encrypted record blob.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLink(#[serde(with = "wide_bytes")] pub [u8; 128]);

impl StorageLink {
    /// Fixed width in bytes.
    pub const LEN: usize = 128;

    /// Create a new storage link from raw bytes.
    pub const fn from_bytes(bytes: [u8; 128]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 128] {
        &self.0
    }
}

impl fmt::Debug for StorageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageLink({})", hex::encode(&self.0[..8]))
    }
}

impl AsRef<[u8]> for StorageLink {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for StorageLink {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 128] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "storage link",
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}

/// Opaque 128-byte wrapped record key.
///
/// Wrapping and unwrapping happen outside the ledger. Debug output never
/// prints the value.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrappedKey(#[serde(with = "wide_bytes")] pub [u8; 128]);

impl WrappedKey {
    /// Fixed width in bytes.
    pub const LEN: usize = 128;

    /// Create a new wrapped key from raw bytes.
    pub const fn from_bytes(bytes: [u8; 128]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 128] {
        &self.0
    }
}

impl fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WrappedKey(..)")
    }
}

impl TryFrom<&[u8]> for WrappedKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 128] = slice.try_into().map_err(|_| CoreError::InvalidLength {
            what: "wrapped key",
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Self(arr))
    }
}
