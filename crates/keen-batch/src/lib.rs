//! # Keen Batch
//!
//! Chunked event submission with partial-failure accounting.
//!
//! ## Overview
//!
//! A large event list for one collection is split into chunks of bounded
//! size. Each chunk becomes one `sendEvents` operation, and all operations
//! go to the [`Transport`] as a single transfer. When the transfer fails
//! part-way, the dispatcher reports how many chunks completed and which did
//! not, instead of failing the whole call.
//!
//! ## Key Properties
//!
//! - **Order-preserving**: chunks concatenate back to the input
//! - **Single attempt**: no retries or backoff at this layer
//! - **Per-chunk accounting**: results count chunks, not events
//! - **Transport-agnostic**: sequential or concurrent execution is the
//!   transport's choice (see [`FanOutTransport`])
//!
//! ## Usage
//!
//! ```rust
//! use keen_batch::{BatchConfig, BatchDispatcher, MemoryTransport};
//! use serde_json::json;
//!
//! # tokio_test_block_on();
//! # fn tokio_test_block_on() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let dispatcher = BatchDispatcher::new(MemoryTransport::failing([1]), BatchConfig::default());
//!
//! let events: Vec<_> = (0..1200).map(|i| json!({"n": i})).collect();
//! let result = dispatcher.submit("purchases", events, 500).await.unwrap();
//!
//! assert_eq!(result.total_chunks, 3);
//! assert_eq!(result.succeeded_chunks, 2);
//! assert_eq!(result.failed_chunk_indices, vec![1]);
//! # });
//! # }
//! ```

pub mod dispatcher;
pub mod error;
pub mod fan_out;
pub mod operation;
pub mod transport;

pub use dispatcher::{chunk_events, BatchConfig, BatchDispatcher, BatchResult, DEFAULT_CHUNK_SIZE};
pub use error::{BatchError, FailedOperation, OperationError, Result, TransferError};
pub use fan_out::{FanOutConfig, FanOutTransport, OperationSender};
pub use operation::{NamedOperation, Response, SEND_EVENTS};
pub use transport::{memory::MemoryTransport, Transport};
