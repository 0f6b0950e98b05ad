//! Cryptographic primitives for scoped keys.
//!
//! Provides the validated master secret, the initialization vector, the
//! pluggable random source, and AES in CBC mode. Padding is applied by the
//! caller (see [`crate::padding`]), so the cipher runs with no padding layer
//! of its own.

use std::fmt;

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{CryptoRng, RngCore};

use crate::error::{Result, ScopedKeyError};
use crate::padding::BLOCK_SIZE;

/// Length of the CBC initialization vector in bytes.
pub const IV_LEN: usize = BLOCK_SIZE;

/// A source of initialization-vector bytes.
///
/// Every `RngCore + CryptoRng` is a `RandomSource`, so `rand::rngs::OsRng`
/// works out of the box. Tests use [`FixedIv`] for reproducible tokens.
pub trait RandomSource {
    /// Fill `dest` with random bytes.
    fn fill_random(&mut self, dest: &mut [u8]);
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn fill_random(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// A deterministic random source that always yields the same IV.
///
/// Only meant for tests and golden vectors. Reusing an IV under the same
/// master secret leaks whether two descriptors share a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIv(pub [u8; IV_LEN]);

impl RandomSource for FixedIv {
    fn fill_random(&mut self, dest: &mut [u8]) {
        for (d, s) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *d = *s;
        }
    }
}

/// AES variant selected by the master secret length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    /// 16-byte secret.
    Aes128,
    /// 24-byte secret.
    Aes192,
    /// 32-byte secret.
    Aes256,
}

impl KeySize {
    /// Map a secret length to the AES variant, if any.
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }
}

/// The master secret used to encrypt scoped keys.
///
/// Construction validates the length, so every `MasterSecret` is a usable
/// AES key.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterSecret {
    bytes: Vec<u8>,
    size: KeySize,
}

impl MasterSecret {
    /// Create from raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        let size = KeySize::from_len(bytes.len())
            .ok_or(ScopedKeyError::InvalidKey { len: bytes.len() })?;
        Ok(Self { bytes, size })
    }

    /// Use the bytes of an API key string directly as the secret.
    ///
    /// A 32-character master key selects AES-256.
    pub fn from_api_key(api_key: &str) -> Result<Self> {
        Self::new(api_key.as_bytes())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The AES variant this secret selects.
    pub fn key_size(&self) -> KeySize {
        self.size
    }

    /// Encrypt block-aligned `plaintext` in CBC mode.
    pub fn encrypt_cbc(&self, iv: &InitVector, plaintext: &[u8]) -> Result<Vec<u8>> {
        check_aligned(plaintext)?;

        let key = self.bytes.as_slice();
        let iv = iv.as_bytes().as_slice();
        let ciphertext = match self.size {
            KeySize::Aes128 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .encrypt_padded_vec_mut::<NoPadding>(plaintext),
            KeySize::Aes192 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .encrypt_padded_vec_mut::<NoPadding>(plaintext),
            KeySize::Aes256 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .encrypt_padded_vec_mut::<NoPadding>(plaintext),
        };
        Ok(ciphertext)
    }

    /// Decrypt block-aligned `ciphertext` in CBC mode.
    ///
    /// No integrity check is performed: a wrong secret yields garbage.
    pub fn decrypt_cbc(&self, iv: &InitVector, ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_aligned(ciphertext)?;

        let key = self.bytes.as_slice();
        let iv = iv.as_bytes().as_slice();
        let plaintext = match self.size {
            KeySize::Aes128 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
            KeySize::Aes192 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
            KeySize::Aes256 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
                .map_err(|_| ScopedKeyError::InvalidKey { len: key.len() })?
                .decrypt_padded_vec_mut::<NoPadding>(ciphertext),
        };
        plaintext.map_err(|e| ScopedKeyError::DecodingError(e.to_string()))
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecret")
            .field("size", &self.size)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl TryFrom<&[u8]> for MasterSecret {
    type Error = ScopedKeyError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

/// A 128-bit CBC initialization vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitVector(pub [u8; IV_LEN]);

impl InitVector {
    /// Draw a fresh IV from `source`.
    pub fn generate<R: RandomSource + ?Sized>(source: &mut R) -> Self {
        let mut bytes = [0u8; IV_LEN];
        source.fill_random(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.0
    }
}

fn check_aligned(data: &[u8]) -> Result<()> {
    if data.len() % BLOCK_SIZE != 0 {
        return Err(ScopedKeyError::DecodingError(format!(
            "cipher input of {} bytes is not a multiple of the block size",
            data.len()
        )));
    }
    Ok(())
}
