//! Domain-separated hashing: persistent commitments, ephemeral values,
//! and nonce evolution.
//!
//! Every hash in the system names a [`HashDomain`]. The preimage is the
//! domain's 32-byte tag block followed by each field in argument order.
//! All fields are fixed width, so plain concatenation is injective.
//!
//! The two output types split the hash into incompatible worlds:
//! [`Commitment`] values are stable and may be stored anywhere, while
//! [`Ephemeral`] values carry no serde support and no byte accessor, so
//! they cannot leave the computation that produced them. The only exit
//! is the explicit [`from_ephemeral`] conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Bytes32, ChildId, NftId, Nonce};

/// Width of the padded tag block at the front of every preimage.
pub const TAG_BLOCK_LEN: usize = 32;

/// The hash domains. Tags are ASCII, distinct, and at most 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Content-addressed parent identity NFTs (persistent).
    NftId,
    /// Derived child identifiers (persistent).
    ChildId,
    /// Nonce evolution (transient). The tag is an opaque constant; only
    /// stability and distinctness matter.
    NonceEvolve,
}

impl HashDomain {
    /// The raw ASCII tag for this domain.
    pub const fn tag(self) -> &'static [u8] {
        match self {
            HashDomain::NftId => b"baby:nft:",
            HashDomain::ChildId => b"baby:child:id:",
            HashDomain::NonceEvolve => b"cradle:ledger:nonce:evolve:v1",
        }
    }

    /// The 32-byte preimage block: tag left-justified, zero-padded.
    pub fn tag_block(self) -> [u8; TAG_BLOCK_LEN] {
        let tag = self.tag();
        let mut block = [0u8; TAG_BLOCK_LEN];
        block[..tag.len()].copy_from_slice(tag);
        block
    }

    /// Whether outputs under this domain may be persisted.
    pub const fn is_persistent(self) -> bool {
        !matches!(self, HashDomain::NonceEvolve)
    }
}

/// A persistent hash output (32 bytes).
///
/// Commitments are stable across processes and machines: equal inputs
/// under the same domain produce equal commitments anywhere.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into raw bytes.
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A transient hash output.
///
/// Ephemeral values exist only inside a single computation. The type
/// deliberately has no serde impls and exposes no bytes; converting back
/// to storable form goes through [`from_ephemeral`] and nothing else.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ephemeral([u8; 32]);

impl fmt::Debug for Ephemeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ephemeral(..)")
    }
}

/// The single total hash routine behind both typed entry points.
fn hash_tagged(domain: HashDomain, fields: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&domain.tag_block());
    for field in fields {
        hasher.update(field);
    }
    *hasher.finalize().as_bytes()
}

/// Hash fields under a persistent domain, yielding a storable commitment.
pub fn persistent_hash(domain: HashDomain, fields: &[&[u8]]) -> Commitment {
    Commitment(hash_tagged(domain, fields))
}

/// Hash fields under a transient domain, yielding an ephemeral value.
pub fn transient_hash(domain: HashDomain, fields: &[&[u8]]) -> Ephemeral {
    Ephemeral(hash_tagged(domain, fields))
}

/// Lift a stored 32-byte value into the ephemeral domain.
pub fn to_ephemeral(value: [u8; 32]) -> Ephemeral {
    Ephemeral(value)
}

/// Lower an ephemeral value back to storable bytes.
///
/// Lossless inverse of [`to_ephemeral`]: the only sanctioned way an
/// ephemeral value reaches persistence.
pub fn from_ephemeral(value: Ephemeral) -> [u8; 32] {
    value.0
}

/// Advance the ledger nonce for the given round.
///
/// The evolved nonce commits to the previous nonce and the round of the
/// operation evolving it, so no (nonce, round) pair ever repeats.
pub fn evolve_nonce(nonce: &Nonce, round: u64) -> Nonce {
    let lifted = to_ephemeral(*nonce.as_bytes());
    let evolved = transient_hash(HashDomain::NonceEvolve, &[&round.to_le_bytes(), &lifted.0]);
    Nonce::from_bytes(from_ephemeral(evolved))
}

/// Derive the content-addressed NFT id for a parent identity.
///
/// A pure function of its inputs: no state is read or written.
pub fn derive_nft_id(firstname: &Bytes32, lastname: &Bytes32, email: &Bytes32) -> NftId {
    let commitment = persistent_hash(
        HashDomain::NftId,
        &[firstname.as_bytes(), lastname.as_bytes(), email.as_bytes()],
    );
    NftId::from_bytes(commitment.into_bytes())
}

/// Derive a child id from personal fields and the evolved nonce.
pub fn derive_child_id(
    name: &Bytes32,
    birth_date: &Bytes32,
    gender: &Bytes32,
    nonce: &Nonce,
) -> ChildId {
    let commitment = persistent_hash(
        HashDomain::ChildId,
        &[
            name.as_bytes(),
            birth_date.as_bytes(),
            gender.as_bytes(),
            nonce.as_bytes(),
        ],
    );
    ChildId::from_bytes(commitment.into_bytes())
}
