//! # Cradle Ledger Core
//!
//! Pure primitives for the Cradle Ledger: typed operands, domain-separated
//! hashing, and the two map entry types.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over fixed-width values.
//!
//! ## Key Types
//!
//! - [`NftId`] / [`ChildId`] - Content-addressed identifiers (Blake3)
//! - [`Nonce`] - The evolving secret that unlinks child ids
//! - [`RoleCredential`] / [`EncryptedRecord`] - The two map entry types
//! - [`LedgerSnapshot`] - Plain-data copy of committed state
//!
//! ## Hash domains
//!
//! Every hash names a [`HashDomain`]. Persistent domains yield
//! [`Commitment`]s that may be stored anywhere; the transient domain
//! yields [`Ephemeral`] values that cannot leave the computation that
//! produced them. See the [`hash`] module.

pub mod credential;
pub mod error;
pub mod hash;
pub mod record;
pub mod state;
pub mod types;

pub use credential::RoleCredential;
pub use error::CoreError;
pub use hash::{
    derive_child_id, derive_nft_id, evolve_nonce, from_ephemeral, persistent_hash, to_ephemeral,
    transient_hash, Commitment, Ephemeral, HashDomain,
};
pub use record::EncryptedRecord;
pub use state::{Cell, LedgerSnapshot, MapId};
pub use types::{Bytes32, ChildId, NftId, Nonce, StorageLink, WrappedKey};
