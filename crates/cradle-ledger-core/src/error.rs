//! Error types for the Cradle Ledger core.

use thiserror::Error;

/// Core errors from operand parsing and entry codecs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid length for {what}: expected {expected} bytes, got {got}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("value for {what} exceeds {max} bytes: got {got}")]
    ValueTooLong {
        what: &'static str,
        max: usize,
        got: usize,
    },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}
