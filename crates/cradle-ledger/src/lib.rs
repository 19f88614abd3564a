//! # Cradle Ledger
//!
//! The unified API for the Cradle system - a deterministic access-control
//! ledger binding role credentials and encrypted child-health records to
//! content-addressed identifiers.
//!
//! ## Overview
//!
//! The Cradle Ledger provides a small, reproducible state machine for:
//!
//! - **NFT ids**: Content-addressed parent identities derived by hashing
//! - **Role credentials**: Time-bounded `(role, valid_until)` grants keyed by NFT id
//! - **Child ids**: Unlinkable identifiers derived from personal fields plus an evolving nonce
//! - **Records**: Encrypted-blob pointers (storage link + wrapped key) keyed by child id
//!
//! ## Key Concepts
//!
//! - **Round**: Monotonic counter. Advances by exactly 1 on each creation
//!   operation; reads and revocations never touch it.
//! - **Nonce**: Secret evolving value. Child-id derivation folds the round
//!   into the nonce, so equal inputs yield distinct ids across calls.
//! - **Overwrite**: Issuing or binding against an existing key replaces the
//!   prior value. Last writer wins, no merge.
//! - **Revocation**: Full removal. A revoked key is indistinguishable from
//!   one that never existed, and revoking twice is not an error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cradle_ledger::{Ledger, Bytes32, Nonce};
//! use cradle_ledger::store::SqliteStore;
//!
//! async fn example() {
//!     // Open storage and write genesis state
//!     let store = SqliteStore::open("cradle.db").unwrap();
//!     let ledger = Ledger::init(store, Nonce::random()).await.unwrap();
//!
//!     // Derive a parent identity
//!     let nft_id = ledger
//!         .generate_nft_id(
//!             &Bytes32::from_text("Ada").unwrap(),
//!             &Bytes32::from_text("Lovelace").unwrap(),
//!             &Bytes32::from_text("ada@example.org").unwrap(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     // Grant a role against it
//!     ledger
//!         .issue_role_credential(
//!             nft_id,
//!             Bytes32::from_text("guardian").unwrap(),
//!             Bytes32::from_text("2027-01-01").unwrap(),
//!         )
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `cradle_ledger::core` - Typed operands, hashing, entry types
//! - `cradle_ledger::store` - Storage abstraction and SQLite

pub mod error;
pub mod ledger;
pub mod op;

// Re-export component crates
pub use cradle_ledger_core as core;
pub use cradle_ledger_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use op::{OpOutput, Operation};

// Re-export commonly used core types
pub use cradle_ledger_core::{
    Bytes32, ChildId, EncryptedRecord, LedgerSnapshot, NftId, Nonce, RoleCredential, StorageLink,
    WrappedKey,
};
