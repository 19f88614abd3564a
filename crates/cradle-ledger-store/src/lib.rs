//! # Cradle Ledger Store
//!
//! Storage abstraction for the Cradle Ledger. Provides a trait-based interface
//! for ledger state persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts ledger state behind the [`StateStore`] trait,
//! allowing the ledger to be storage-agnostic. The primary implementation
//! is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! State is shaped as three scalar cells (round counter, evolving nonce,
//! reserved slot) plus two keyed maps (role credentials, encrypted records).
//! Reads see committed state only; writes are staged in a [`WriteBatch`]
//! and applied atomically.
//!
//! ## Key Types
//!
//! - [`StateStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`WriteBatch`] - Staged writes applied as one atomic unit
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cradle_ledger_store::{SqliteStore, StateStore, WriteBatch};
//! use cradle_ledger_core::Cell;
//!
//! async fn example() {
//!     // Open a SQLite database
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!
//!     // Or use an in-memory database for testing
//!     let store = SqliteStore::open_memory().unwrap();
//!
//!     // Stage and commit writes atomically
//!     let mut batch = WriteBatch::new();
//!     batch.set_cell(Cell::Round, 0u64.to_le_bytes().to_vec());
//!     store.apply(batch).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic batches**: A batch either commits in full or not at all
//! - **Overwrite semantics**: Inserting an existing map key replaces its value
//! - **No-op removes**: Removing an absent map key succeeds silently
//! - **Ordered scans**: Map entries enumerate in ascending key order

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{StateStore, WriteBatch, WriteOp};
