//! Native SHA-256 over fixed-width words.
//!
//! This is the out-of-circuit twin of [`crate::circuit::gadgets::sha256`]. Both sides
//! serialize a word as `word_bits / 8` bytes in little-endian byte order and read the
//! digest back as eight big-endian 32-bit words.

use ff::PrimeField;
use sha2::{Digest, Sha256};

use crate::config::{DIGEST_WORDS, DIGEST_WORD_BITS};
use crate::error::{GadgetError, Result};
use crate::utils::field_to_u64;

/// A SHA-256 digest as eight 32-bit words.
pub type NativeDigest = [u32; DIGEST_WORDS];

/// Serializes words exactly as the in-circuit hash input is laid out.
pub fn serialize_words(words: &[u64], word_bits: usize) -> Result<Vec<u8>> {
    crate::config::WordShape::new(words.len().max(1), word_bits)?;
    let bytes_per_word = word_bits / 8;
    let mut out = Vec::with_capacity(words.len() * bytes_per_word);
    for &word in words {
        if word_bits < 64 && word >> word_bits != 0 {
            return Err(GadgetError::InvalidInput(format!(
                "word {} does not fit in {} bits",
                word, word_bits
            )));
        }
        out.extend_from_slice(&word.to_le_bytes()[..bytes_per_word]);
    }
    Ok(out)
}

/// SHA-256 of raw bytes, as digest words.
pub fn hash_bytes(bytes: &[u8]) -> NativeDigest {
    let out = Sha256::digest(bytes);
    let mut digest = [0u32; DIGEST_WORDS];
    for (word, chunk) in digest.iter_mut().zip(out.chunks(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    digest
}

/// SHA-256 of a word sequence.
pub fn hash_words(words: &[u64], word_bits: usize) -> Result<NativeDigest> {
    Ok(hash_bytes(&serialize_words(words, word_bits)?))
}

/// Digest words widened for use in a word sequence.
pub fn digest_words(digest: &NativeDigest) -> Vec<u64> {
    digest.iter().map(|w| u64::from(*w)).collect()
}

/// SHA-256 of 32-bit words; infallible since every word fits its width.
pub fn hash_u32_words(words: &[u32]) -> NativeDigest {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    hash_bytes(&bytes)
}

/// Hash of two concatenated digests, the Merkle node function.
pub fn hash_digest_pair(left: &NativeDigest, right: &NativeDigest) -> NativeDigest {
    let mut words = left.to_vec();
    words.extend_from_slice(right);
    hash_u32_words(&words)
}

/// Digest words as field elements.
pub fn digest_to_fields<F: PrimeField>(digest: &NativeDigest) -> Vec<F> {
    digest.iter().map(|w| F::from(u64::from(*w))).collect()
}

/// Reads eight field elements back into a digest, rejecting values above 32 bits.
pub fn digest_from_fields<F: PrimeField>(values: &[F]) -> Result<NativeDigest> {
    GadgetError::check_len("digest words", DIGEST_WORDS, values.len())?;
    let mut digest = [0u32; DIGEST_WORDS];
    for (slot, value) in digest.iter_mut().zip(values) {
        *slot = field_to_u64(value)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                GadgetError::InvalidInput(format!(
                    "digest word exceeds {} bits",
                    DIGEST_WORD_BITS
                ))
            })?;
    }
    Ok(digest)
}
