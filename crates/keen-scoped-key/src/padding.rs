//! PKCS#7 padding.
//!
//! The pad byte value equals the pad length. Input that is already a
//! multiple of the block size still receives a full block of padding, so
//! the padded output is never empty and unpadding is always unambiguous.

use crate::error::{Result, ScopedKeyError};

/// Block size of the cipher used for scoped keys (AES).
pub const BLOCK_SIZE: usize = 16;

/// Pad `data` to a multiple of `block_size`.
///
/// `block_size` must be in `1..=255`.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));

    let pad_len = block_size - (data.len() % block_size);
    let mut out = Vec::with_capacity(data.len() + pad_len);
    out.extend_from_slice(data);
    out.resize(data.len() + pad_len, pad_len as u8);
    out
}

/// Strip PKCS#7 padding from `data`, returning the unpadded prefix.
///
/// Fails if the pad byte is zero, larger than the block size, larger than
/// the data, or if the trailing bytes do not all carry the pad value.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8]> {
    let Some(&last) = data.last() else {
        return Err(ScopedKeyError::PaddingError("empty plaintext".into()));
    };

    let pad_len = last as usize;
    if pad_len == 0 {
        return Err(ScopedKeyError::PaddingError("pad length is zero".into()));
    }
    if pad_len > block_size {
        return Err(ScopedKeyError::PaddingError(format!(
            "pad length {pad_len} exceeds block size {block_size}"
        )));
    }
    if pad_len > data.len() {
        return Err(ScopedKeyError::PaddingError(format!(
            "pad length {pad_len} exceeds plaintext length {}",
            data.len()
        )));
    }

    let (body, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b != last) {
        return Err(ScopedKeyError::PaddingError("inconsistent pad bytes".into()));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pad_partial_block() {
        let padded = pad(b"hello", BLOCK_SIZE);
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn test_pad_aligned_input_gets_full_block() {
        let data = [0x61u8; 32];
        let padded = pad(&data, BLOCK_SIZE);
        assert_eq!(padded.len(), 48);
        assert!(padded[32..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_pad_empty_input() {
        let padded = pad(b"", BLOCK_SIZE);
        assert_eq!(padded, vec![16u8; 16]);
        assert_eq!(unpad(&padded, BLOCK_SIZE).unwrap(), b"");
    }

    #[test]
    fn test_unpad_rejects_zero() {
        let mut block = [0x41u8; 16];
        block[15] = 0;
        assert!(matches!(
            unpad(&block, BLOCK_SIZE),
            Err(ScopedKeyError::PaddingError(_))
        ));
    }

    #[test]
    fn test_unpad_rejects_oversized_pad() {
        let block = [17u8; 32];
        assert!(matches!(
            unpad(&block, BLOCK_SIZE),
            Err(ScopedKeyError::PaddingError(_))
        ));
    }

    #[test]
    fn test_unpad_rejects_pad_longer_than_data() {
        let data = [4u8, 4, 4];
        assert!(matches!(
            unpad(&data, BLOCK_SIZE),
            Err(ScopedKeyError::PaddingError(_))
        ));
    }

    #[test]
    fn test_unpad_rejects_inconsistent_bytes() {
        let mut padded = pad(b"abc", BLOCK_SIZE);
        padded[10] ^= 0xff;
        assert!(matches!(
            unpad(&padded, BLOCK_SIZE),
            Err(ScopedKeyError::PaddingError(_))
        ));
    }

    #[test]
    fn test_unpad_rejects_empty() {
        assert!(unpad(&[], BLOCK_SIZE).is_err());
    }

    proptest! {
        #[test]
        fn padded_length_is_positive_block_multiple(data in prop::collection::vec(any::<u8>(), 0..200)) {
            let padded = pad(&data, BLOCK_SIZE);
            prop_assert!(!padded.is_empty());
            prop_assert_eq!(padded.len() % BLOCK_SIZE, 0);
            prop_assert!(padded.len() > data.len());
            prop_assert!(padded.len() - data.len() <= BLOCK_SIZE);
        }

        #[test]
        fn unpad_recovers_original(data in prop::collection::vec(any::<u8>(), 0..200)) {
            let padded = pad(&data, BLOCK_SIZE);
            let recovered = unpad(&padded, BLOCK_SIZE).unwrap();
            prop_assert_eq!(recovered, &data[..]);
        }
    }
}
