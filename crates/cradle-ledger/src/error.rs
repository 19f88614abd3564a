//! Error types for the Ledger.
//!
//! Errors fall into three classes: malformed caller input
//! ([`LedgerError::InvalidArgument`]), absent map entries
//! ([`LedgerError::CredentialNotFound`], [`LedgerError::RecordNotFound`]),
//! and internal faults (storage failures, corrupt state, lifecycle misuse).
//! The first two are recoverable typed outcomes; faults abort the in-flight
//! operation without committing partial writes.

use cradle_ledger_core::{ChildId, CoreError, NftId};
use cradle_ledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed fixed-width input, rejected before any state mutation.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CoreError),

    /// No role credential is bound to the given NFT id.
    #[error("role credential not found: {0}")]
    CredentialNotFound(NftId),

    /// No record is bound to the given child id.
    #[error("record not found: {0}")]
    RecordNotFound(ChildId),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The store holds no genesis state.
    #[error("ledger is not initialized")]
    NotInitialized,

    /// The store already holds genesis state.
    #[error("ledger is already initialized")]
    AlreadyInitialized,

    /// Stored bytes failed to decode.
    #[error("corrupt ledger state: {0}")]
    Corrupt(String),
}

impl LedgerError {
    /// True for the recoverable absent-entry outcomes of read operations.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::CredentialNotFound(_) | LedgerError::RecordNotFound(_)
        )
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
