//! The scoped key token: `hex(iv) || hex(ciphertext)`.
//!
//! There is no version byte and no authentication tag. The first
//! `2 * IV_LEN` hex characters are the IV, the rest is ciphertext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::{InitVector, IV_LEN};
use crate::error::{Result, ScopedKeyError};
use crate::padding::BLOCK_SIZE;

/// An opaque, transportable scoped key.
///
/// Always lowercase hex when produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopedKey(String);

impl ScopedKey {
    /// Assemble a token from its parts.
    pub fn from_parts(iv: &InitVector, ciphertext: &[u8]) -> Self {
        let mut s = String::with_capacity(2 * (IV_LEN + ciphertext.len()));
        s.push_str(&hex::encode(iv.as_bytes()));
        s.push_str(&hex::encode(ciphertext));
        Self(s)
    }

    /// Wrap a token string without validating it.
    ///
    /// Validation happens in [`ScopedKey::split`].
    pub fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Parse and validate a token string. Hex is accepted in either case.
    pub fn parse(token: &str) -> Result<Self> {
        let key = Self(token.to_owned());
        key.split()?;
        Ok(key)
    }

    /// Get the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the token string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the token in hex characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into IV and ciphertext bytes.
    pub fn split(&self) -> Result<(InitVector, Vec<u8>)> {
        let token = self.0.as_str();
        let iv_hex_len = 2 * IV_LEN;

        if !token.is_ascii() {
            return Err(ScopedKeyError::DecodingError("token is not ASCII hex".into()));
        }
        if token.len() < iv_hex_len + 2 * BLOCK_SIZE {
            return Err(ScopedKeyError::DecodingError(format!(
                "token too short: {} hex chars",
                token.len()
            )));
        }

        let (iv_hex, ct_hex) = token.split_at(iv_hex_len);

        let mut iv = [0u8; IV_LEN];
        hex::decode_to_slice(iv_hex, &mut iv)?;

        let ciphertext = hex::decode(ct_hex)?;
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(ScopedKeyError::DecodingError(format!(
                "ciphertext length {} is not a multiple of {BLOCK_SIZE}",
                ciphertext.len()
            )));
        }

        Ok((InitVector::from_bytes(iv), ciphertext))
    }
}

impl fmt::Display for ScopedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ScopedKey {
    type Err = ScopedKeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for ScopedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ScopedKey> for String {
    fn from(key: ScopedKey) -> Self {
        key.0
    }
}
