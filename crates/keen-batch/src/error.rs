//! Error types for batch submission.

use thiserror::Error;

use crate::operation::NamedOperation;

/// Errors that abort a batch submission.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Caller passed an unusable argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// An operation the transport could not complete.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedOperation {
    /// The operation as submitted.
    pub operation: NamedOperation,
    /// Why it failed.
    pub reason: String,
}

/// A transfer in which at least one operation did not complete.
///
/// Both lists are in submission order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "transfer failed: {} succeeded, {} failed",
    .successful_operations.len(),
    .failed_operations.len()
)]
pub struct TransferError {
    /// Operations that completed.
    pub successful_operations: Vec<NamedOperation>,
    /// Operations that did not complete.
    pub failed_operations: Vec<FailedOperation>,
}

impl TransferError {
    /// Total number of operations in the failed transfer.
    pub fn total(&self) -> usize {
        self.successful_operations.len() + self.failed_operations.len()
    }

    /// Indices of the failed operations.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failed_operations
            .iter()
            .map(|f| f.operation.index)
            .collect()
    }
}

/// Boxed error returned by a single operation send.
pub type OperationError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
