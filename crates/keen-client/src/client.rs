//! The client: unified API for event batches and scoped keys.
//!
//! Brings the batch dispatcher and the scoped key codec together behind
//! one configuration.

use keen_batch::{BatchDispatcher, BatchResult, Transport};
use keen_scoped_key::{
    MasterSecret, PermissionDescriptor, RandomSource, ScopedKey, ScopedKeyCodec,
};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;

/// The main client struct.
///
/// Provides a unified API for:
/// - Submitting large event lists in chunks
/// - Minting scoped keys under the project's master key
/// - Decrypting scoped keys minted with the same master key
pub struct KeenClient<T: Transport> {
    /// Configuration.
    config: ClientConfig,
    /// Batch dispatcher over the transport.
    dispatcher: BatchDispatcher<T>,
}

impl<T: Transport> KeenClient<T> {
    /// Create a new client.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let dispatcher = BatchDispatcher::new(transport, config.batch.clone());
        Self { config, dispatcher }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    /// Check that the configuration is usable.
    pub fn validate_configuration(&self) -> Result<()> {
        self.config.validate()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add events to `collection` in chunks of the configured size.
    pub async fn add_batched_events(
        &self,
        collection: &str,
        events: Vec<Value>,
    ) -> Result<BatchResult> {
        self.add_batched_events_with_size(collection, events, self.config.batch.chunk_size)
            .await
    }

    /// Add events to `collection` in chunks of `chunk_size`.
    ///
    /// A partially failed transfer is reported in the result, not as an
    /// error.
    pub async fn add_batched_events_with_size(
        &self,
        collection: &str,
        events: Vec<Value>,
        chunk_size: usize,
    ) -> Result<BatchResult> {
        Ok(self.dispatcher.submit(collection, events, chunk_size).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scoped Keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Mint a scoped key for `descriptor` under the master key.
    pub fn scoped_key(&self, descriptor: &PermissionDescriptor) -> Result<ScopedKey> {
        let key = self.codec()?.encode(descriptor)?;
        self.log_minted(descriptor);
        Ok(key)
    }

    /// Mint a scoped key, drawing the IV from `source`.
    pub fn scoped_key_with<R: RandomSource + ?Sized>(
        &self,
        descriptor: &PermissionDescriptor,
        source: &mut R,
    ) -> Result<ScopedKey> {
        let key = self.codec()?.encode_with(descriptor, source)?;
        self.log_minted(descriptor);
        Ok(key)
    }

    /// Decrypt a scoped key minted under the master key.
    pub fn decrypt_scoped_key(&self, scoped_key: &str) -> Result<PermissionDescriptor> {
        Ok(self.codec()?.decode_str(scoped_key)?)
    }

    fn codec(&self) -> Result<ScopedKeyCodec> {
        self.validate_configuration()?;
        let master_key = self.config.require_master_key()?;
        Ok(ScopedKeyCodec::new(MasterSecret::from_api_key(master_key)?))
    }

    fn log_minted(&self, descriptor: &PermissionDescriptor) {
        tracing::debug!(
            project_id = self.config.project_id.as_deref().unwrap_or_default(),
            filters = descriptor.filters.len(),
            allowed_operations = ?descriptor.allowed_operations,
            "minted scoped key"
        );
    }
}
