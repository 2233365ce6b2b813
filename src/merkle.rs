//! Native SHA-256 Merkle tree for the shielded gadgets.
//!
//! This module builds fixed-height trees over leaf digests and produces the
//! authentication paths that the in-circuit path gadget consumes. The node function
//! is SHA-256 over the 16 words of `left ++ right`.
//!
//! Direction convention, shared with [`crate::circuit::gadgets::merkle`]: a direction
//! bit of `true` means the running hash is the **left** operand at that level.

use serde::{Deserialize, Serialize};

use crate::config::MAX_TREE_HEIGHT;
use crate::error::{GadgetError, Result};
use crate::sha256::{hash_digest_pair, hash_words, NativeDigest};

/// Hashes the leaf preimage words into the level-0 digest.
pub fn hash_leaf(leaf_words: &[u64], word_bits: usize) -> Result<NativeDigest> {
    hash_words(leaf_words, word_bits)
}

/// An authentication path: one sibling and one direction bit per level, leaf first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Sibling digests from the leaf level upwards.
    pub siblings: Vec<NativeDigest>,
    /// `true` puts the running hash on the left at that level.
    pub directions: Vec<bool>,
}

impl MerklePath {
    /// Builds a path from siblings and a packed selector (bit `i` drives level `i`).
    pub fn from_selector(siblings: Vec<NativeDigest>, selector: u64) -> Result<Self> {
        if siblings.len() > 64 {
            return Err(GadgetError::InvalidShape(format!(
                "selector holds 64 directions, path has {}",
                siblings.len()
            )));
        }
        let directions = (0..siblings.len())
            .map(|i| (selector >> i) & 1 == 1)
            .collect();
        Ok(Self {
            siblings,
            directions,
        })
    }

    /// Number of levels.
    pub fn height(&self) -> usize {
        self.siblings.len()
    }

    /// Direction bits packed into one integer, level 0 least significant.
    pub fn selector(&self) -> u64 {
        self.directions
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, bit)| acc | (u64::from(*bit) << i))
    }

    /// Walks the path upwards from a leaf digest.
    pub fn root_from_digest(&self, leaf_digest: &NativeDigest) -> Result<NativeDigest> {
        GadgetError::check_len("path directions", self.siblings.len(), self.directions.len())?;
        let mut current = *leaf_digest;
        for (sibling, current_is_left) in self.siblings.iter().zip(&self.directions) {
            current = if *current_is_left {
                hash_digest_pair(&current, sibling)
            } else {
                hash_digest_pair(sibling, &current)
            };
        }
        Ok(current)
    }
}

/// Recomputes the root for a leaf preimage and its path.
pub fn compute_root(leaf_words: &[u64], word_bits: usize, path: &MerklePath) -> Result<NativeDigest> {
    path.root_from_digest(&hash_leaf(leaf_words, word_bits)?)
}

/// Verifies a path against a given root.
/// This is a non-circuit implementation for direct verification.
pub fn verify_path(
    root: &NativeDigest,
    leaf_digest: &NativeDigest,
    path: &MerklePath,
) -> bool {
    path.root_from_digest(leaf_digest)
        .map(|computed| &computed == root)
        .unwrap_or(false)
}

/// A fixed-height Merkle tree with layers stored from leaves (layer 0) to root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerkleTree {
    /// Layer 0 holds the leaf digests; the last layer holds the root alone.
    pub layers: Vec<Vec<NativeDigest>>,
}

impl MerkleTree {
    /// Builds a tree of exactly `height` levels over the given leaf digests.
    ///
    /// A layer with an odd number of nodes hashes its last node with itself.
    pub fn from_leaf_digests(leaves: Vec<NativeDigest>, height: usize) -> Result<Self> {
        if height > MAX_TREE_HEIGHT {
            return Err(GadgetError::InvalidShape(format!(
                "tree height {} exceeds limit of {}",
                height, MAX_TREE_HEIGHT
            )));
        }
        if leaves.is_empty() || leaves.len() > 1usize << height {
            return Err(GadgetError::InvalidInput(format!(
                "{} leaves do not fit a tree of height {}",
                leaves.len(),
                height
            )));
        }

        let mut layers = vec![leaves];
        for _ in 0..height {
            let current = layers
                .last()
                .ok_or_else(|| GadgetError::InvalidInput("empty tree layer".to_string()))?;
            let next: Vec<NativeDigest> = current
                .chunks(2)
                .map(|pair| {
                    if pair.len() == 2 {
                        hash_digest_pair(&pair[0], &pair[1])
                    } else {
                        hash_digest_pair(&pair[0], &pair[0])
                    }
                })
                .collect();
            layers.push(next);
        }
        Ok(Self { layers })
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> NativeDigest {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or_default()
    }

    /// Authentication path for the leaf at `leaf_index`.
    pub fn path(&self, leaf_index: usize) -> Result<MerklePath> {
        let leaf_count = self.layers.first().map(Vec::len).unwrap_or(0);
        if leaf_index >= leaf_count {
            return Err(GadgetError::InvalidInput(format!(
                "leaf index {} out of bounds for {} leaves",
                leaf_index, leaf_count
            )));
        }

        let mut siblings = Vec::with_capacity(self.height());
        let mut directions = Vec::with_capacity(self.height());
        let mut index = leaf_index;
        for layer in &self.layers[..self.height()] {
            let is_left = index % 2 == 0;
            let sibling_index = if is_left { index + 1 } else { index - 1 };
            // Missing right neighbour: the node was hashed with itself
            let sibling = layer.get(sibling_index).unwrap_or(&layer[index]);
            siblings.push(*sibling);
            directions.push(is_left);
            index /= 2;
        }
        Ok(MerklePath {
            siblings,
            directions,
        })
    }
}
