//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// A previous holder of the store lock panicked.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The blocking task running a query was cancelled or panicked.
    #[error("blocking task failed: {0}")]
    TaskJoin(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
