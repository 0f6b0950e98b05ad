//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use keen_batch::MemoryTransport;
use keen_client::{ClientConfig, KeenClient};
use keen_scoped_key::{
    operations, Filter, FixedIv, Operator, PermissionDescriptor, ScopedKeyCodec, IV_LEN,
};
use serde_json::{json, Value};

/// Master key used by fixtures. 32 ASCII bytes, so AES-256.
pub const MASTER_KEY: &str = "0123456789ABCDEF0123456789ABCDEF";

/// Project id used by fixtures.
pub const PROJECT_ID: &str = "test-project";

/// A test fixture with a configured client over a memory transport.
pub struct TestFixture {
    pub client: KeenClient<MemoryTransport>,
    pub iv: [u8; IV_LEN],
}

impl TestFixture {
    /// Create a fixture whose transport accepts everything.
    pub fn new() -> Self {
        Self::with_transport(MemoryTransport::new())
    }

    /// Create a fixture over the given transport.
    pub fn with_transport(transport: MemoryTransport) -> Self {
        let config = ClientConfig::new(PROJECT_ID).master_key(MASTER_KEY);
        Self {
            client: KeenClient::new(config, transport),
            iv: [0x24; IV_LEN],
        }
    }

    /// A codec keyed with the fixture's master key.
    pub fn codec(&self) -> ScopedKeyCodec {
        match ScopedKeyCodec::from_secret_bytes(MASTER_KEY.as_bytes()) {
            Ok(codec) => codec,
            Err(e) => unreachable!("fixture master key is 32 bytes: {e}"),
        }
    }

    /// An IV source that always yields the fixture's IV.
    pub fn fixed_iv(&self) -> FixedIv {
        FixedIv(self.iv)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A read-only descriptor limited to one customer.
pub fn customer_descriptor(customer: &str) -> PermissionDescriptor {
    PermissionDescriptor::new()
        .filter(Filter::eq("customer.id", customer))
        .allow(operations::READ)
}

/// A descriptor exercising several operators and value types.
pub fn rich_descriptor() -> PermissionDescriptor {
    PermissionDescriptor::new()
        .filter(Filter::eq("account_id", "acme"))
        .filter(Filter::new("age", Operator::Gte, 21))
        .filter(Filter::new("plan", Operator::In, json!(["pro", "enterprise"])))
        .filter(Filter::new("deleted", Operator::Exists, false))
        .allow(operations::READ)
        .allow(operations::CACHED_QUERIES)
}

/// `n` sample events, each tagged with its position.
pub fn sample_events(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "seq": i,
                "item": format!("item-{i}"),
                "keen": { "timestamp": "2026-01-01T00:00:00.000Z" },
            })
        })
        .collect()
}
