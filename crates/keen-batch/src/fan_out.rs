//! Concurrent fan-out transport.
//!
//! Runs each operation of a transfer as its own task, bounded by a
//! semaphore, then folds the outcomes back into submission order. A single
//! failing operation does not stop the others.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{FailedOperation, OperationError, TransferError};
use crate::operation::{NamedOperation, Response};
use crate::transport::{Result, Transport};

/// Sends a single operation to the service.
///
/// This is the seam to the HTTP client: one call, one request.
#[async_trait]
pub trait OperationSender: Send + Sync + 'static {
    /// Send `operation`, returning the decoded response body.
    async fn send(&self, operation: &NamedOperation) -> std::result::Result<Value, OperationError>;
}

/// Configuration for the fan-out transport.
#[derive(Debug, Clone)]
pub struct FanOutConfig {
    /// Maximum operations in flight at once.
    pub max_concurrency: usize,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

/// A [`Transport`] that executes operations concurrently.
pub struct FanOutTransport<S: OperationSender> {
    sender: Arc<S>,
    config: FanOutConfig,
}

impl<S: OperationSender> FanOutTransport<S> {
    /// Create a fan-out transport over `sender`.
    pub fn new(sender: S, config: FanOutConfig) -> Self {
        Self {
            sender: Arc::new(sender),
            config,
        }
    }

    /// Get the sender.
    pub fn sender(&self) -> &S {
        &self.sender
    }
}

#[async_trait]
impl<S: OperationSender> Transport for FanOutTransport<S> {
    async fn execute(&self, operations: Vec<NamedOperation>) -> Result<Vec<Response>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (position, operation) in operations.iter().cloned().enumerate() {
            let sender = Arc::clone(&self.sender);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquire only fails if it is dropped.
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = sender.send(&operation).await.map_err(|e| e.to_string());
                (position, outcome)
            });
        }

        let mut outcomes: Vec<Option<std::result::Result<Value, String>>> =
            vec![None; operations.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, outcome)) => outcomes[position] = Some(outcome),
                Err(e) => tracing::warn!(error = %e, "operation task did not complete"),
            }
        }

        let mut responses = Vec::with_capacity(operations.len());
        let mut successful = Vec::new();
        let mut failed = Vec::new();

        for (operation, outcome) in operations.into_iter().zip(outcomes) {
            match outcome {
                Some(Ok(body)) => {
                    responses.push(Response::new(operation.index, body));
                    successful.push(operation);
                }
                Some(Err(reason)) => {
                    tracing::debug!(index = operation.index, %reason, "operation failed");
                    failed.push(FailedOperation { operation, reason });
                }
                None => failed.push(FailedOperation {
                    operation,
                    reason: "operation task aborted".into(),
                }),
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
