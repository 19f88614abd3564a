//! # Cradle Ledger Testkit
//!
//! Testing utilities for the Cradle Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known derivation inputs with expected outputs for
//!   cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the hash derivation pipeline across implementations:
//!
//! ```rust
//! use cradle_ledger_testkit::vectors::{all_vectors, child_id_from_vector};
//!
//! for vector in all_vectors() {
//!     let id = child_id_from_vector(&vector);
//!     println!("{}: {}", vector.name, id.to_hex());
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cradle_ledger_testkit::generators::{child_id_from_params, ChildIdParams};
//!
//! proptest! {
//!     #[test]
//!     fn child_id_is_deterministic(params: ChildIdParams) {
//!         let id1 = child_id_from_params(&params);
//!         let id2 = child_id_from_params(&params);
//!         prop_assert_eq!(id1, id2);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up an initialized ledger over an in-memory store:
//!
//! ```rust,no_run
//! use cradle_ledger_testkit::fixtures::TestLedger;
//!
//! # async fn demo() {
//! let fixture = TestLedger::with_seed([7u8; 32]).await;
//! let nft_id = fixture.issue_sample_credential().await;
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{seeded_ledgers, TestLedger};
pub use generators::{child_id_from_params, ChildIdParams};
pub use vectors::{
    all_vectors, child_id_from_vector, nft_id_from_vector, verify_all_vectors, GoldenVector,
    VectorReport,
};
