//! Error types for scoped key derivation.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a scoped key.
#[derive(Debug, Error)]
pub enum ScopedKeyError {
    /// Master secret is not a valid AES key length.
    #[error("invalid master secret: {len} bytes, expected 16, 24 or 32")]
    InvalidKey { len: usize },

    /// Permission descriptor could not be serialized.
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Token or decrypted plaintext could not be parsed.
    #[error("decoding error: {0}")]
    DecodingError(String),

    /// PKCS#7 padding is malformed (tampered token or wrong secret).
    #[error("padding error: {0}")]
    PaddingError(String),
}

impl From<hex::FromHexError> for ScopedKeyError {
    fn from(e: hex::FromHexError) -> Self {
        ScopedKeyError::DecodingError(format!("invalid hex: {e}"))
    }
}

/// Result type for scoped key operations.
pub type Result<T> = std::result::Result<T, ScopedKeyError>;
