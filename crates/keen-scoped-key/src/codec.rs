//! Scoped key encoding and decoding.
//!
//! `encode`: JSON descriptor → PKCS#7 pad → AES-CBC under the master secret
//! with a fresh IV → `hex(iv) || hex(ciphertext)`.
//!
//! `decode` reverses the steps. The construction is unauthenticated, so a
//! wrong secret or a tampered token usually surfaces as a padding or
//! decoding error, and can in rare cases yield a different descriptor.

use rand::rngs::OsRng;

use crate::crypto::{InitVector, MasterSecret, RandomSource};
use crate::descriptor::PermissionDescriptor;
use crate::error::Result;
use crate::padding::{pad, unpad, BLOCK_SIZE};
use crate::token::ScopedKey;

/// Encodes and decodes scoped keys under one master secret.
///
/// Stateless apart from the secret; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ScopedKeyCodec {
    secret: MasterSecret,
}

impl ScopedKeyCodec {
    /// Create a codec for `secret`.
    pub fn new(secret: MasterSecret) -> Self {
        Self { secret }
    }

    /// Create a codec from raw secret bytes, validating the length.
    pub fn from_secret_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self::new(MasterSecret::new(bytes)?))
    }

    /// The master secret.
    pub fn secret(&self) -> &MasterSecret {
        &self.secret
    }

    /// Encode `descriptor` with an IV drawn from the operating system RNG.
    pub fn encode(&self, descriptor: &PermissionDescriptor) -> Result<ScopedKey> {
        self.encode_with(descriptor, &mut OsRng)
    }

    /// Encode `descriptor` with an IV drawn from `source`.
    pub fn encode_with<R: RandomSource + ?Sized>(
        &self,
        descriptor: &PermissionDescriptor,
        source: &mut R,
    ) -> Result<ScopedKey> {
        encode(&self.secret, descriptor, source)
    }

    /// Decode a token back into its descriptor.
    pub fn decode(&self, token: &ScopedKey) -> Result<PermissionDescriptor> {
        decode(&self.secret, token)
    }

    /// Parse and decode a token string.
    pub fn decode_str(&self, token: &str) -> Result<PermissionDescriptor> {
        decode(&self.secret, &ScopedKey::parse(token)?)
    }
}

/// Encode `descriptor` into a scoped key under `secret`.
pub fn encode<R: RandomSource + ?Sized>(
    secret: &MasterSecret,
    descriptor: &PermissionDescriptor,
    source: &mut R,
) -> Result<ScopedKey> {
    let plaintext = descriptor.to_json_bytes()?;
    let padded = pad(&plaintext, BLOCK_SIZE);

    let iv = InitVector::generate(source);
    let ciphertext = secret.encrypt_cbc(&iv, &padded)?;

    tracing::trace!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        filters = descriptor.filters.len(),
        "encoded scoped key"
    );

    Ok(ScopedKey::from_parts(&iv, &ciphertext))
}

/// Decode a scoped key under `secret`.
pub fn decode(secret: &MasterSecret, token: &ScopedKey) -> Result<PermissionDescriptor> {
    let (iv, ciphertext) = token.split()?;
    let padded = secret.decrypt_cbc(&iv, &ciphertext)?;
    let plaintext = unpad(&padded, BLOCK_SIZE)?;

    tracing::trace!(
        ciphertext_len = ciphertext.len(),
        plaintext_len = plaintext.len(),
        "decrypted scoped key"
    );

    PermissionDescriptor::from_json_bytes(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{FixedIv, IV_LEN};
    use crate::descriptor::{operations, Filter, Operator};
    use crate::error::ScopedKeyError;
    use serde_json::json;

    fn codec() -> ScopedKeyCodec {
        ScopedKeyCodec::from_secret_bytes(*b"0123456789abcdef0123456789abcdef").unwrap()
    }

    fn descriptor() -> PermissionDescriptor {
        PermissionDescriptor::new()
            .filter(Filter::eq("account_id", "acme"))
            .filter(Filter::new("age", Operator::Gte, 21))
            .allow(operations::READ)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let codec = codec();
        let token = codec.encode(&descriptor()).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), descriptor());
    }

    #[test]
    fn test_roundtrip_without_operations() {
        let codec = codec();
        let d = PermissionDescriptor::with_filters(vec![json!({"anything": [1, 2, 3]})]);
        let token = codec.encode(&d).unwrap();
        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded, d);
        assert!(decoded.allowed_operations.is_empty());
    }

    #[test]
    fn test_token_structure() {
        let codec = codec();
        let d = descriptor();
        let token = codec.encode_with(&d, &mut FixedIv([9u8; IV_LEN])).unwrap();

        let plaintext_len = d.to_json_bytes().unwrap().len();
        let ct_len = (plaintext_len / BLOCK_SIZE + 1) * BLOCK_SIZE;
        assert_eq!(token.len(), 2 * (IV_LEN + ct_len));
        assert!(token.as_str().starts_with(&"09".repeat(IV_LEN)));
        assert!(token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_fixed_iv_is_reproducible() {
        let codec = codec();
        let a = codec.encode_with(&descriptor(), &mut FixedIv([1u8; IV_LEN])).unwrap();
        let b = codec.encode_with(&descriptor(), &mut FixedIv([1u8; IV_LEN])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_ivs_different_tokens() {
        let codec = codec();
        let a = codec.encode_with(&descriptor(), &mut FixedIv([1u8; IV_LEN])).unwrap();
        let b = codec.encode_with(&descriptor(), &mut FixedIv([2u8; IV_LEN])).unwrap();
        assert_ne!(a, b);
        assert_eq!(codec.decode(&a).unwrap(), codec.decode(&b).unwrap());
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        let codec = codec();
        let token = codec.encode(&descriptor()).unwrap();
        let upper = token.as_str().to_uppercase();
        assert_eq!(codec.decode_str(&upper).unwrap(), descriptor());
    }

    #[test]
    fn test_wrong_key_never_silently_matches() {
        let codec = codec();
        let other = ScopedKeyCodec::from_secret_bytes(*b"fedcba9876543210fedcba9876543210").unwrap();

        for seed in 0u8..32 {
            let token = codec
                .encode_with(&descriptor(), &mut FixedIv([seed; IV_LEN]))
                .unwrap();
            match other.decode(&token) {
                Err(ScopedKeyError::PaddingError(_)) | Err(ScopedKeyError::DecodingError(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
                Ok(d) => assert_ne!(d, descriptor()),
            }
        }
    }

    #[test]
    fn test_tampered_token_fails_or_diverges() {
        let codec = codec();
        let token = codec.encode(&descriptor()).unwrap();

        // Flip a bit in the last ciphertext block's predecessor to corrupt padding.
        let mut bytes = hex::decode(token.as_str()).unwrap();
        let idx = bytes.len() - BLOCK_SIZE - 1;
        bytes[idx] ^= 0x01;
        let tampered = ScopedKey::new_unchecked(hex::encode(bytes));

        match codec.decode(&tampered) {
            Err(_) => {}
            Ok(d) => assert_ne!(d, descriptor()),
        }
    }

    #[test]
    fn test_invalid_secret_length() {
        let err = ScopedKeyCodec::from_secret_bytes(vec![0u8; 20]).unwrap_err();
        assert!(matches!(err, ScopedKeyError::InvalidKey { len: 20 }));
    }

    #[test]
    fn test_decode_garbage_token() {
        let codec = codec();
        assert!(matches!(
            codec.decode_str("not a token"),
            Err(ScopedKeyError::DecodingError(_))
        ));
    }
}
