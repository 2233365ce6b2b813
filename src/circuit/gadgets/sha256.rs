//! SHA-256 over fixed-width field words.
//!
//! Each input word is range-decomposed into `word_bits` bits, laid out as little-endian
//! bytes with every byte fed most significant bit first, and hashed with the bellpepper
//! SHA-256 gadget. The 256 output bits are packed back into eight 32-bit words, read
//! big-endian, which is also how [`crate::sha256`] lays out the native digest.

use bellpepper::gadgets::sha256::sha256;
use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::PrimeField;
use tracing::trace;

use super::bits::{pack_bits_le, to_bits_le_fixed};
use crate::config::{WordShape, DIGEST_WORDS, DIGEST_WORD_BITS};
use crate::error::{GadgetError, Result};
use crate::sha256::{digest_from_fields, digest_to_fields, NativeDigest};

/// A digest held as eight allocated 32-bit words.
#[derive(Clone)]
pub struct DigestVar<F: PrimeField> {
    words: Vec<AllocatedNum<F>>,
}

impl<F: PrimeField> DigestVar<F> {
    /// Wraps eight words. The caller is responsible for their range.
    pub fn from_words(words: Vec<AllocatedNum<F>>) -> Result<Self> {
        GadgetError::check_len("digest words", DIGEST_WORDS, words.len())?;
        Ok(Self { words })
    }

    /// Allocates a private digest witness.
    pub fn alloc<CS: ConstraintSystem<F>>(mut cs: CS, value: Option<&NativeDigest>) -> Result<Self> {
        let values = value.map(digest_to_fields::<F>);
        let words = (0..DIGEST_WORDS)
            .map(|i| {
                AllocatedNum::alloc(cs.namespace(|| format!("word_{}", i)), || {
                    values
                        .as_ref()
                        .map(|v| v[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { words })
    }

    /// Allocates a digest as public inputs.
    pub fn alloc_input<CS: ConstraintSystem<F>>(
        mut cs: CS,
        value: Option<&NativeDigest>,
    ) -> Result<Self> {
        let values = value.map(digest_to_fields::<F>);
        let words = (0..DIGEST_WORDS)
            .map(|i| {
                AllocatedNum::alloc_input(cs.namespace(|| format!("word_{}", i)), || {
                    values
                        .as_ref()
                        .map(|v| v[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { words })
    }

    /// The eight words, most significant first.
    pub fn words(&self) -> &[AllocatedNum<F>] {
        &self.words
    }

    /// Witness value, if assigned and in range.
    pub fn get_value(&self) -> Option<NativeDigest> {
        let values = self
            .words
            .iter()
            .map(|w| w.get_value())
            .collect::<Option<Vec<F>>>()?;
        digest_from_fields(&values).ok()
    }

    /// Exposes every word as a public input.
    pub fn inputize<CS: ConstraintSystem<F>>(&self, mut cs: CS) -> Result<()> {
        for (i, word) in self.words.iter().enumerate() {
            word.inputize(cs.namespace(|| format!("word_{}", i)))?;
        }
        Ok(())
    }
}

/// Decomposes words into the SHA-256 message bit order.
pub fn serialize_words<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    words: &[AllocatedNum<F>],
    shape: &WordShape,
) -> Result<Vec<Boolean>> {
    GadgetError::check_len("hash input words", shape.words, words.len())?;

    let mut message = Vec::with_capacity(shape.total_bits());
    for (i, word) in words.iter().enumerate() {
        let bits_le = to_bits_le_fixed(
            cs.namespace(|| format!("word_{}_bits", i)),
            word,
            shape.word_bits,
        )?;
        for byte in bits_le.chunks(8) {
            message.extend(byte.iter().rev().cloned());
        }
    }
    Ok(message)
}

/// Runs the compression over a prepared message; the length must be a whole number of bytes.
pub fn sha256_bits<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    message: &[Boolean],
) -> Result<Vec<Boolean>> {
    if message.len() % 8 != 0 {
        return Err(GadgetError::InvalidShape(format!(
            "hash input of {} bits is not byte aligned",
            message.len()
        )));
    }
    Ok(sha256(cs.namespace(|| "sha256"), message)?)
}

/// Packs 256 big-endian output bits into eight digest words.
pub fn digest_from_bits<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    bits: &[Boolean],
) -> Result<DigestVar<F>> {
    GadgetError::check_len("digest bits", DIGEST_WORDS * DIGEST_WORD_BITS, bits.len())?;
    let words = bits
        .chunks(DIGEST_WORD_BITS)
        .enumerate()
        .map(|(i, chunk)| {
            let le: Vec<Boolean> = chunk.iter().rev().cloned().collect();
            pack_bits_le(cs.namespace(|| format!("digest_word_{}", i)), &le)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    DigestVar::from_words(words)
}

/// SHA-256 of a word sequence.
pub fn sha256_words<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    words: &[AllocatedNum<F>],
    shape: &WordShape,
) -> Result<DigestVar<F>> {
    trace!(words = shape.words, word_bits = shape.word_bits, "hashing word sequence");
    let message = serialize_words(cs.namespace(|| "serialize"), words, shape)?;
    let bits = sha256_bits(cs.namespace(|| "compress"), &message)?;
    digest_from_bits(cs.namespace(|| "pack"), &bits)
}

/// SHA-256 of the concatenation of digests and single words, each a 32-bit word.
pub fn sha256_concat<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    words: &[AllocatedNum<F>],
) -> Result<DigestVar<F>> {
    let shape = WordShape::new(words.len(), DIGEST_WORD_BITS)?;
    sha256_words(cs, words, &shape)
}
