//! # Keen Scoped Keys
//!
//! Restricted-capability API keys derived from a master secret.
//!
//! ## Overview
//!
//! A scoped key is a [`PermissionDescriptor`] (query filters plus optional
//! allowed operations) encrypted under the project's master secret. The
//! resulting hex token can be handed to untrusted callers: the service
//! decrypts it and applies the filters, and the master secret never leaves
//! the server that minted the key.
//!
//! ## Construction
//!
//! ```text
//! plaintext = json({"filters": [...], "allowed_operations": [...]?})
//! padded    = pkcs7(plaintext, 16)
//! iv        = 16 random bytes
//! token     = hex(iv) || hex(aes_cbc(master_secret, iv, padded))
//! ```
//!
//! The AES variant follows the secret length (16, 24 or 32 bytes).
//!
//! ## Security Notes
//!
//! CBC without a MAC provides confidentiality only. A holder of a scoped key
//! cannot read the master secret, but nothing in the token detects tampering.
//! Decoding with the wrong secret usually fails on padding or JSON parsing,
//! and is not guaranteed to. This matches the service's wire format; do not
//! rely on `decode` as an integrity check.
//!
//! ## Usage
//!
//! ```rust
//! use keen_scoped_key::{operations, Filter, PermissionDescriptor, ScopedKeyCodec};
//!
//! let codec = ScopedKeyCodec::from_secret_bytes(*b"0123456789abcdef0123456789abcdef").unwrap();
//!
//! let descriptor = PermissionDescriptor::new()
//!     .filter(Filter::eq("customer.id", "acme"))
//!     .allow(operations::READ);
//!
//! let key = codec.encode(&descriptor).unwrap();
//! assert_eq!(codec.decode(&key).unwrap(), descriptor);
//! ```

pub mod codec;
pub mod crypto;
pub mod descriptor;
pub mod error;
pub mod padding;
pub mod token;

pub use codec::{decode, encode, ScopedKeyCodec};
pub use crypto::{FixedIv, InitVector, KeySize, MasterSecret, RandomSource, IV_LEN};
pub use descriptor::{operations, Filter, Operator, PermissionDescriptor};
pub use error::{Result, ScopedKeyError};
pub use padding::{pad, unpad, BLOCK_SIZE};
pub use token::ScopedKey;
