//! Ledger state addressing and snapshots.
//!
//! The committed state is three named cells plus two maps ordered by
//! key. [`Cell`] and [`MapId`] are the closed address space; stores are
//! generic over them and never invent slots of their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::credential::RoleCredential;
use crate::error::CoreError;
use crate::record::EncryptedRecord;
use crate::types::{ChildId, NftId, Nonce};

/// The named scalar cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// Monotonic operation counter.
    Round,
    /// The evolving secret nonce.
    Nonce,
    /// Vestigial slot kept for layout compatibility. Initialized to zero
    /// and never read or written by any operation.
    Reserved,
}

impl Cell {
    /// Stable storage name.
    pub const fn name(self) -> &'static str {
        match self {
            Cell::Round => "round",
            Cell::Nonce => "nonce",
            Cell::Reserved => "reserved",
        }
    }

    pub const ALL: [Cell; 3] = [Cell::Round, Cell::Nonce, Cell::Reserved];
}

/// The named maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapId {
    /// nft_id -> RoleCredential
    Credentials,
    /// child_id -> EncryptedRecord
    Records,
}

impl MapId {
    /// Stable storage name.
    pub const fn name(self) -> &'static str {
        match self {
            MapId::Credentials => "role_credentials",
            MapId::Records => "records",
        }
    }

    pub const ALL: [MapId; 2] = [MapId::Credentials, MapId::Records];
}

/// A full copy of committed ledger state.
///
/// Snapshots are plain data: maps are ordered by key, so encoding the
/// same state always yields the same bytes. This is the state handed to
/// provers, auditors, and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub round: u64,
    pub nonce: Nonce,
    pub reserved: u64,
    pub credentials: BTreeMap<NftId, RoleCredential>,
    pub records: BTreeMap<ChildId, EncryptedRecord>,
}

impl LedgerSnapshot {
    /// Fresh state: zero round, caller-supplied nonce seed, empty maps.
    pub fn genesis(nonce_seed: Nonce) -> Self {
        Self {
            round: 0,
            nonce: nonce_seed,
            reserved: 0,
            credentials: BTreeMap::new(),
            records: BTreeMap::new(),
        }
    }

    /// Encode as CBOR.
    pub fn to_cbor(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Decode from CBOR.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bytes32, StorageLink, WrappedKey};

    #[test]
    fn test_cell_names_stable() {
        assert_eq!(Cell::Round.name(), "round");
        assert_eq!(Cell::Nonce.name(), "nonce");
        assert_eq!(Cell::Reserved.name(), "reserved");
        assert_eq!(MapId::Credentials.name(), "role_credentials");
        assert_eq!(MapId::Records.name(), "records");
    }

    #[test]
    fn test_genesis_layout() {
        let seed = Nonce::from_bytes([9u8; 32]);
        let snap = LedgerSnapshot::genesis(seed);
        assert_eq!(snap.round, 0);
        assert_eq!(snap.reserved, 0);
        assert_eq!(snap.nonce, seed);
        assert!(snap.credentials.is_empty());
        assert!(snap.records.is_empty());
    }

    #[test]
    fn test_cbor_roundtrip_with_entries() {
        let mut snap = LedgerSnapshot::genesis(Nonce::from_bytes([1u8; 32]));
        snap.round = 3;
        snap.credentials.insert(
            NftId::from_bytes([2u8; 32]),
            RoleCredential::new(
                Bytes32::from_text("guardian").unwrap(),
                Bytes32::from_text("2026-01-01").unwrap(),
            ),
        );
        snap.records.insert(
            ChildId::from_bytes([3u8; 32]),
            EncryptedRecord::new(
                ChildId::from_bytes([3u8; 32]),
                StorageLink::from_bytes([4u8; 128]),
                WrappedKey::from_bytes([5u8; 128]),
            ),
        );

        let bytes = snap.to_cbor().unwrap();
        let back = LedgerSnapshot::from_cbor(&bytes).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_cbor_is_insertion_order_independent() {
        let keys = [[7u8; 32], [1u8; 32], [4u8; 32]];
        let cred = RoleCredential::new(Bytes32::ZERO, Bytes32::ZERO);

        let mut forward = LedgerSnapshot::genesis(Nonce::from_bytes([0u8; 32]));
        for k in keys {
            forward.credentials.insert(NftId::from_bytes(k), cred);
        }

        let mut backward = LedgerSnapshot::genesis(Nonce::from_bytes([0u8; 32]));
        for k in keys.iter().rev() {
            backward.credentials.insert(NftId::from_bytes(*k), cred);
        }

        assert_eq!(forward.to_cbor().unwrap(), backward.to_cbor().unwrap());
    }

    #[test]
    fn test_from_cbor_rejects_garbage() {
        assert!(LedgerSnapshot::from_cbor(&[0xFF, 0x00, 0x12]).is_err());
    }
}
