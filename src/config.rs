//! Centralized configuration for the shielded gadgets.
//!
//! Constants fix the circuit shapes used throughout the crate. Shape structs carry the
//! loop bounds and widths a gadget needs; they are validated once, before any constraint
//! is allocated, so the constraint graph never depends on witness values.

use ff::PrimeField;

use crate::error::{GadgetError, Result};

/// Number of 32-bit words in a SHA-256 digest.
pub const DIGEST_WORDS: usize = 8;

/// Bit width of a digest word.
pub const DIGEST_WORD_BITS: usize = 32;

/// Bit width used to decompose exponents. Equals the bit length of the BN254 scalar field.
pub const EXPONENT_BITS: usize = 254;

/// Bit width of scalar note fields (value, nonce, commitment salts).
pub const NOTE_FIELD_BITS: usize = 32;

/// Bit width of the age witness in the age-threshold circuit.
pub const AGE_BITS: usize = 32;

/// Bit width of one ASCII character.
pub const CHAR_BITS: usize = 8;

/// Number of 32-bit words in a Merkle leaf of the standalone membership circuit.
pub const MEMBERSHIP_LEAF_WORDS: usize = 10;

/// Default tree height of the standalone membership circuit.
pub const DEFAULT_MEMBERSHIP_HEIGHT: usize = 2;

/// Default tree height of the pour circuit.
pub const DEFAULT_POUR_HEIGHT: usize = 3;

/// Largest tree height accepted by [`MerkleShape`].
pub const MAX_TREE_HEIGHT: usize = 32;

/// Deterministic seed shared by tests and the sample inputs.
pub const TEST_RANDOM_SEED: u64 = 42;

/// Shape of a sequence of fixed-width words fed to the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordShape {
    /// Number of words
    pub words: usize,
    /// Bits per word, a multiple of 8 in `8..=64`
    pub word_bits: usize,
}

impl WordShape {
    /// Validates and creates a word shape.
    pub fn new(words: usize, word_bits: usize) -> Result<Self> {
        if word_bits == 0 || word_bits % 8 != 0 || word_bits > 64 {
            return Err(GadgetError::InvalidShape(format!(
                "word width {} is not a multiple of 8 in 8..=64",
                word_bits
            )));
        }
        if words == 0 {
            return Err(GadgetError::InvalidShape(
                "hash input needs at least one word".to_string(),
            ));
        }
        Ok(Self { words, word_bits })
    }

    /// Total number of message bits.
    pub fn total_bits(&self) -> usize {
        self.words * self.word_bits
    }

    /// Total number of message bytes.
    pub fn total_bytes(&self) -> usize {
        self.total_bits() / 8
    }
}

/// Shape of a square-and-multiply exponentiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentShape {
    /// Number of exponent bits processed
    pub width: usize,
}

impl ExponentShape {
    /// Validates and creates an exponent shape.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(GadgetError::InvalidShape(
                "exponent width must be positive".to_string(),
            ));
        }
        Ok(Self { width })
    }

    /// Shape covering every element of the field `F`.
    pub fn full<F: PrimeField>() -> Self {
        Self {
            width: F::NUM_BITS as usize,
        }
    }
}

impl Default for ExponentShape {
    fn default() -> Self {
        Self {
            width: EXPONENT_BITS,
        }
    }
}

/// Shape of a Merkle authentication path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerkleShape {
    /// Number of levels between leaf and root
    pub height: usize,
    /// Layout of the leaf preimage
    pub leaf: WordShape,
}

impl MerkleShape {
    /// Validates and creates a Merkle shape.
    pub fn new(height: usize, leaf_words: usize, leaf_word_bits: usize) -> Result<Self> {
        if height > MAX_TREE_HEIGHT {
            return Err(GadgetError::InvalidShape(format!(
                "tree height {} exceeds limit of {}",
                height, MAX_TREE_HEIGHT
            )));
        }
        Ok(Self {
            height,
            leaf: WordShape::new(leaf_words, leaf_word_bits)?,
        })
    }

    /// Shape of the standalone membership circuit: ten 32-bit leaf words.
    pub fn membership(height: usize) -> Result<Self> {
        Self::new(height, MEMBERSHIP_LEAF_WORDS, DIGEST_WORD_BITS)
    }

    /// Shape of note-commitment trees: the leaf is a digest.
    pub fn commitment_tree(height: usize) -> Result<Self> {
        Self::new(height, DIGEST_WORDS, DIGEST_WORD_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_shape_validation() {
        assert!(WordShape::new(10, 32).is_ok());
        assert!(WordShape::new(2, 8).is_ok());
        assert!(WordShape::new(1, 12).is_err());
        assert!(WordShape::new(1, 0).is_err());
        assert!(WordShape::new(0, 32).is_err());
        assert_eq!(WordShape::new(10, 32).unwrap().total_bytes(), 40);
    }

    #[test]
    fn test_exponent_shape() {
        assert!(ExponentShape::new(0).is_err());
        assert_eq!(ExponentShape::default().width, EXPONENT_BITS);
        assert_eq!(
            ExponentShape::full::<crate::FieldElement>().width,
            EXPONENT_BITS
        );
    }

    #[test]
    fn test_merkle_shape_limits() {
        assert!(MerkleShape::membership(2).is_ok());
        assert!(MerkleShape::membership(0).is_ok());
        assert!(MerkleShape::membership(MAX_TREE_HEIGHT + 1).is_err());
        assert_eq!(MerkleShape::commitment_tree(3).unwrap().leaf.words, 8);
    }
}
