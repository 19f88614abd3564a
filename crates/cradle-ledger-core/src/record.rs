//! Encrypted record pointers: map entries binding a child id to an
//! off-ledger encrypted blob.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{ChildId, StorageLink, WrappedKey};

/// A record binding as stored in the ledger.
///
/// The ledger holds only the pointer and the wrapped key; the record
/// content and the key-wrapping scheme live outside. The child id is
/// repeated inside the entry so a returned value is self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    pub child_id: ChildId,
    pub storage_link: StorageLink,
    pub wrapped_key: WrappedKey,
}

impl EncryptedRecord {
    /// Stored width: child_id, storage_link, wrapped_key.
    pub const ENCODED_LEN: usize = 288;

    pub fn new(child_id: ChildId, storage_link: StorageLink, wrapped_key: WrappedKey) -> Self {
        Self {
            child_id,
            storage_link,
            wrapped_key,
        }
    }

    /// Canonical stored form: fixed-width field concatenation.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..32].copy_from_slice(self.child_id.as_bytes());
        out[32..160].copy_from_slice(self.storage_link.as_bytes());
        out[160..].copy_from_slice(self.wrapped_key.as_bytes());
        out
    }

    /// Decode the canonical stored form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(CoreError::InvalidLength {
                what: "encrypted record",
                expected: Self::ENCODED_LEN,
                got: bytes.len(),
            });
        }
        let child_id = ChildId::try_from(&bytes[..32])?;
        let storage_link = StorageLink::try_from(&bytes[32..160])?;
        let wrapped_key = WrappedKey::try_from(&bytes[160..])?;
        Ok(Self {
            child_id,
            storage_link,
            wrapped_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EncryptedRecord {
        EncryptedRecord::new(
            ChildId::from_bytes([0x21; 32]),
            StorageLink::from_bytes([0x42; 128]),
            WrappedKey::from_bytes([0x63; 128]),
        )
    }

    #[test]
    fn test_codec_roundtrip() {
        let record = sample();
        let bytes = record.to_bytes();
        assert_eq!(bytes.len(), EncryptedRecord::ENCODED_LEN);
        let back = EncryptedRecord::from_bytes(&bytes).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_codec_layout() {
        let record = sample();
        let bytes = record.to_bytes();
        assert_eq!(&bytes[..32], record.child_id.as_bytes());
        assert_eq!(&bytes[32..160], &record.storage_link.as_bytes()[..]);
        assert_eq!(&bytes[160..], &record.wrapped_key.as_bytes()[..]);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(EncryptedRecord::from_bytes(&[0u8; 287]).is_err());
        assert!(EncryptedRecord::from_bytes(&[0u8; 289]).is_err());
    }

    #[test]
    fn test_cbor_roundtrip() {
        let record = sample();
        let mut buf = Vec::new();
        ciborium::into_writer(&record, &mut buf).unwrap();
        let back: EncryptedRecord = ciborium::from_reader(&buf[..]).unwrap();
        assert_eq!(back, record);
    }
}
