//! Client configuration.
//!
//! Loading is left to the embedding application: the struct deserializes
//! from any serde format, and every field has a default.

use std::fmt;

use keen_batch::BatchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Configuration for a [`crate::KeenClient`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Project the client writes to.
    pub project_id: Option<String>,
    /// Master key; also the secret scoped keys are encrypted under.
    pub master_key: Option<String>,
    /// Write key.
    pub write_key: Option<String>,
    /// Read key.
    pub read_key: Option<String>,
    /// Batch submission settings.
    pub batch: BatchConfig,
}

impl ClientConfig {
    /// Create a configuration for `project_id`.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }

    /// Set the master key.
    pub fn master_key(mut self, key: impl Into<String>) -> Self {
        self.master_key = Some(key.into());
        self
    }

    /// Set the write key.
    pub fn write_key(mut self, key: impl Into<String>) -> Self {
        self.write_key = Some(key.into());
        self
    }

    /// Set the read key.
    pub fn read_key(mut self, key: impl Into<String>) -> Self {
        self.read_key = Some(key.into());
        self
    }

    /// Set the number of events per batch chunk.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.batch.chunk_size = size;
        self
    }

    /// Check that a project id is set.
    pub fn validate(&self) -> Result<()> {
        match self.project_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(ClientError::Configuration("project id is not set".into())),
        }
    }

    /// The master key, or a configuration error if it is missing.
    pub fn require_master_key(&self) -> Result<&str> {
        match self.master_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ClientError::Configuration("master key is not set".into())),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &Option<String>) -> &'static str {
            if key.is_some() {
                "<redacted>"
            } else {
                "<unset>"
            }
        }

        f.debug_struct("ClientConfig")
            .field("project_id", &self.project_id)
            .field("master_key", &redact(&self.master_key))
            .field("write_key", &redact(&self.write_key))
            .field("read_key", &redact(&self.read_key))
            .field("batch", &self.batch)
            .finish()
    }
}
