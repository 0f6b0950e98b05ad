//! # Keen Client
//!
//! The unified client core for the Keen IO event analytics service.
//!
//! ## Overview
//!
//! - **Batched events**: large event lists are split into chunks and sent as
//!   one transfer, with per-chunk success and failure accounting
//! - **Scoped keys**: permission descriptors encrypted under the master key,
//!   safe to hand to untrusted callers
//!
//! HTTP is not part of this crate. Supply a [`Transport`] (or an
//! [`OperationSender`] wrapped in a [`FanOutTransport`]) that talks to the
//! service.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keen_client::{ClientConfig, KeenClient, MemoryTransport};
//! use keen_client::scoped_key::{operations, Filter, PermissionDescriptor};
//! use serde_json::json;
//!
//! async fn example() {
//!     let config = ClientConfig::new("project-id")
//!         .master_key("0123456789ABCDEF0123456789ABCDEF");
//!     let client = KeenClient::new(config, MemoryTransport::new());
//!
//!     // Send 1200 events as three chunks of at most 500
//!     let events = (0..1200).map(|i| json!({"n": i})).collect();
//!     let result = client.add_batched_events("purchases", events).await.unwrap();
//!     println!("{}/{} chunks sent", result.succeeded_chunks, result.total_chunks);
//!
//!     // Mint a read-only key limited to one customer
//!     let descriptor = PermissionDescriptor::new()
//!         .filter(Filter::eq("customer.id", "acme"))
//!         .allow(operations::READ);
//!     let key = client.scoped_key(&descriptor).unwrap();
//!     assert_eq!(client.decrypt_scoped_key(key.as_str()).unwrap(), descriptor);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `keen_client::batch` - Chunked submission and transports
//! - `keen_client::scoped_key` - Scoped key codec and descriptors

pub mod client;
pub mod config;
pub mod error;

// Re-export component crates
pub use keen_batch as batch;
pub use keen_scoped_key as scoped_key;

// Re-export main types for convenience
pub use client::KeenClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};

// Re-export commonly used component types
pub use keen_batch::{
    BatchConfig, BatchResult, FanOutConfig, FanOutTransport, MemoryTransport, NamedOperation,
    OperationSender, Response, TransferError, Transport,
};
pub use keen_scoped_key::{MasterSecret, PermissionDescriptor, ScopedKey, ScopedKeyCodec};
