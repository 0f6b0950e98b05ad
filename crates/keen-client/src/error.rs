//! Error types for the client.

use keen_batch::BatchError;
use keen_scoped_key::ScopedKeyError;
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client configuration is incomplete.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Scoped key error.
    #[error("scoped key error: {0}")]
    ScopedKey(#[from] ScopedKeyError),

    /// Batch submission error.
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
