//! # Keen Testkit
//!
//! Testing utilities for the Keen client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed secret, IV and descriptor with the exact token expected
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the token format byte for byte:
//!
//! ```rust
//! use keen_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let token = vector.encode().unwrap();
//!     assert_eq!(token.as_str(), vector.expected_token);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use keen_testkit::generators::{descriptor_from_params, DescriptorParams};
//!
//! proptest! {
//!     #[test]
//!     fn descriptor_json_is_deterministic(params: DescriptorParams) {
//!         let d1 = descriptor_from_params(&params);
//!         let d2 = descriptor_from_params(&params);
//!         prop_assert_eq!(d1.to_json_bytes().unwrap(), d2.to_json_bytes().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use keen_testkit::fixtures::{customer_descriptor, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let key = fixture.client.scoped_key(&customer_descriptor("acme")).unwrap();
//! assert_eq!(key.len() % 32, 0);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{customer_descriptor, rich_descriptor, sample_events, TestFixture};
pub use generators::{descriptor_from_params, DescriptorParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
