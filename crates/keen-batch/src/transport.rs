//! Transport abstraction for batch submission.
//!
//! The transport executes named operations against the service. It owns
//! HTTP, retries at the connection level, and concurrency; the dispatcher
//! only needs an accurate account of which operations completed.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransferError;
use crate::operation::{NamedOperation, Response};

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransferError>;

/// Transport trait for executing a transfer of operations.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `operations` as one logical transfer.
    ///
    /// Returns one response per operation in submission order when all
    /// complete. If any operation does not complete, returns a
    /// [`TransferError`] listing the completed and failed operations.
    async fn execute(&self, operations: Vec<NamedOperation>) -> Result<Vec<Response>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, operations: Vec<NamedOperation>) -> Result<Vec<Response>> {
        (**self).execute(operations).await
    }
}

/// A simple in-memory transport for testing.
///
/// Records every operation it is given and fails the ones whose index was
/// configured to fail.
pub mod memory {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use tokio::sync::Mutex;

    use crate::error::FailedOperation;

    /// In-memory transport implementation.
    #[derive(Default)]
    pub struct MemoryTransport {
        /// Operation indices that fail.
        fail_indices: HashSet<usize>,
        /// Fail every operation.
        fail_all: bool,
        /// Every operation executed, in order.
        executed: Mutex<Vec<NamedOperation>>,
        /// Number of `execute` calls.
        calls: AtomicUsize,
    }

    impl MemoryTransport {
        /// A transport where every operation succeeds.
        pub fn new() -> Self {
            Self::default()
        }

        /// A transport that fails the operations at `indices`.
        pub fn failing(indices: impl IntoIterator<Item = usize>) -> Self {
            Self {
                fail_indices: indices.into_iter().collect(),
                ..Self::default()
            }
        }

        /// A transport that fails every operation.
        pub fn failing_all() -> Self {
            Self {
                fail_all: true,
                ..Self::default()
            }
        }

        /// Operations executed so far.
        pub async fn executed(&self) -> Vec<NamedOperation> {
            self.executed.lock().await.clone()
        }

        /// Number of transfers executed so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn should_fail(&self, operation: &NamedOperation) -> bool {
            self.fail_all || self.fail_indices.contains(&operation.index)
        }
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn execute(&self, operations: Vec<NamedOperation>) -> Result<Vec<Response>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.executed.lock().await.extend(operations.iter().cloned());

            let mut responses = Vec::with_capacity(operations.len());
            let mut successful = Vec::new();
            let mut failed = Vec::new();

            for operation in operations {
                if self.should_fail(&operation) {
                    failed.push(FailedOperation {
                        operation,
                        reason: "injected failure".into(),
                    });
                } else {
                    responses.push(Response::new(
                        operation.index,
                        json!({"created": true, "events": operation.event_count()}),
                    ));
                    successful.push(operation);
                }
            }

            if failed.is_empty() {
                Ok(responses)
            } else {
                Err(TransferError {
                    successful_operations: successful,
                    failed_operations: failed,
                })
            }
        }
    }
}
