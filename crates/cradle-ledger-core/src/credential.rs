//! Role credentials: capability entries keyed by NFT id.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Bytes32;

/// A role credential as stored in the ledger.
///
/// `valid_until` is opaque: the ledger stores and returns it but never
/// interprets or enforces expiry. Enforcement belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCredential {
    pub role: Bytes32,
    pub valid_until: Bytes32,
}

impl RoleCredential {
    /// Stored width: role followed by valid_until.
    pub const ENCODED_LEN: usize = 64;

    pub fn new(role: Bytes32, valid_until: Bytes32) -> Self {
        Self { role, valid_until }
    }

    /// Canonical stored form: fixed-width field concatenation.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..32].copy_from_slice(self.role.as_bytes());
        out[32..].copy_from_slice(self.valid_until.as_bytes());
        out
    }

    /// Decode the canonical stored form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(CoreError::InvalidLength {
                what: "role credential",
                expected: Self::ENCODED_LEN,
                got: bytes.len(),
            });
        }
        let role = Bytes32::try_from(&bytes[..32])?;
        let valid_until = Bytes32::try_from(&bytes[32..])?;
        Ok(Self { role, valid_until })
    }
}
