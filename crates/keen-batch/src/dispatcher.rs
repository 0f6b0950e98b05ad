//! Batch dispatcher.
//!
//! Splits an event list into fixed-size chunks, submits one operation per
//! chunk in a single transfer, and reports how many chunks made it. A failed
//! transfer is not an error here: it becomes a partial [`BatchResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BatchError, Result};
use crate::operation::NamedOperation;
use crate::transport::Transport;

/// Default number of events per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Configuration for batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum events per operation.
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Outcome of a batch submission, per chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Number of chunks the events were split into.
    pub total_chunks: usize,
    /// Chunks the transport completed.
    pub succeeded_chunks: usize,
    /// Chunks the transport could not complete.
    pub failed_chunks: usize,
    /// Zero-based indices of the failed chunks, ascending.
    pub failed_chunk_indices: Vec<usize>,
}

impl BatchResult {
    /// A result where all `total` chunks succeeded.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total_chunks: total,
            succeeded_chunks: total,
            failed_chunks: 0,
            failed_chunk_indices: Vec::new(),
        }
    }

    /// Whether every chunk succeeded.
    pub fn is_success(&self) -> bool {
        self.failed_chunks == 0 && self.succeeded_chunks == self.total_chunks
    }
}

/// Split `items` into ordered chunks of at most `chunk_size`.
///
/// Produces `ceil(len / chunk_size)` chunks; all but the last are full.
pub fn chunk_events<T>(items: Vec<T>, chunk_size: usize) -> Result<Vec<Vec<T>>> {
    if chunk_size == 0 {
        return Err(BatchError::InvalidArgument(
            "chunk size must be at least 1".into(),
        ));
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut iter = items.into_iter().peekable();
    while iter.peek().is_some() {
        chunks.push(iter.by_ref().take(chunk_size).collect());
    }
    Ok(chunks)
}

/// Submits event batches through a [`Transport`].
///
/// Holds no per-call state; concurrent `submit` calls are independent.
pub struct BatchDispatcher<T: Transport> {
    /// The transport layer.
    transport: T,
    /// Configuration.
    config: BatchConfig,
}

impl<T: Transport> BatchDispatcher<T> {
    /// Create a dispatcher over `transport`.
    pub fn new(transport: T, config: BatchConfig) -> Self {
        Self { transport, config }
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Submit `events` to `collection` using the configured chunk size.
    pub async fn submit_default(&self, collection: &str, events: Vec<Value>) -> Result<BatchResult> {
        self.submit(collection, events, self.config.chunk_size).await
    }

    /// Submit `events` to `collection` in chunks of `chunk_size`.
    ///
    /// Makes a single attempt. Chunks that fail are counted and their
    /// indices reported, never retried.
    pub async fn submit(
        &self,
        collection: &str,
        events: Vec<Value>,
        chunk_size: usize,
    ) -> Result<BatchResult> {
        let event_count = events.len();
        let chunks = chunk_events(events, chunk_size)?;
        let total = chunks.len();

        if total == 0 {
            tracing::debug!(collection, "no events to submit");
            return Ok(BatchResult::default());
        }

        let operations: Vec<NamedOperation> = chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| NamedOperation::send_events(index, collection, chunk))
            .collect();

        tracing::debug!(
            collection,
            events = event_count,
            chunks = total,
            chunk_size,
            "submitting event batch"
        );

        match self.transport.execute(operations).await {
            Ok(_) => Ok(BatchResult::all_succeeded(total)),
            Err(e) => {
                let mut failed_chunk_indices = e.failed_indices();
                failed_chunk_indices.sort_unstable();

                if e.total() != total {
                    tracing::warn!(
                        collection,
                        expected = total,
                        reported = e.total(),
                        "transport reported a different number of operations than submitted"
                    );
                }

                let result = BatchResult {
                    total_chunks: total,
                    succeeded_chunks: e.successful_operations.len(),
                    failed_chunks: e.failed_operations.len(),
                    failed_chunk_indices,
                };

                tracing::warn!(
                    collection,
                    total = result.total_chunks,
                    succeeded = result.succeeded_chunks,
                    failed = result.failed_chunks,
                    "event batch partially failed"
                );

                Ok(result)
            }
        }
    }
}
