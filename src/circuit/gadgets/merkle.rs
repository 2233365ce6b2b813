//! Merkle path verification gadgets for circuits.
//!
//! The tree height is a [`MerkleShape`] parameter: every level is always processed, and
//! the direction bits only reorder the operands of each node hash.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem};
use ff::PrimeField;
#[cfg(debug_assertions)]
use tracing::debug;

use super::arith::add_sub;
use super::bits::to_bits_le_fixed;
use super::equality::{check_digest, CheckMode};
use super::select::select;
use super::sha256::{sha256_concat, sha256_words, DigestVar};
use crate::config::MerkleShape;
use crate::error::{GadgetError, Result};

/// Splits a packed selector into `height` direction bits, bit `i` driving level `i`.
/// The selector must be below `2^height`.
pub fn direction_bits_from_selector<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    selector: &AllocatedNum<F>,
    height: usize,
) -> Result<Vec<Boolean>> {
    Ok(to_bits_le_fixed(cs, selector, height)?)
}

/// Orders `current` and `sibling` into the `left ++ right` node preimage.
///
/// A direction bit of `1` puts the running hash on the left. The right operand is
/// recovered as `current + sibling - left` instead of a second selection.
fn order_pair<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    direction: &Boolean,
    current: &DigestVar<F>,
    sibling: &DigestVar<F>,
) -> Result<Vec<AllocatedNum<F>>> {
    let mut left = Vec::with_capacity(current.words().len());
    let mut right = Vec::with_capacity(current.words().len());
    for (j, (c, s)) in current.words().iter().zip(sibling.words()).enumerate() {
        let l = select(cs.namespace(|| format!("left_{}", j)), direction, c, s)?;
        let r = add_sub(cs.namespace(|| format!("right_{}", j)), c, s, &l)?;
        left.push(l);
        right.push(r);
    }
    left.extend(right);
    Ok(left)
}

/// Walks the path upwards from an already hashed leaf.
pub fn root_from_leaf_digest<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    leaf_digest: &DigestVar<F>,
    siblings: &[DigestVar<F>],
    directions: &[Boolean],
    height: usize,
) -> Result<DigestVar<F>> {
    GadgetError::check_len("merkle siblings", height, siblings.len())?;
    GadgetError::check_len("merkle directions", height, directions.len())?;

    #[cfg(debug_assertions)]
    debug!("merkle path: height {}", height);

    let mut current = leaf_digest.clone();
    for (level, (sibling, direction)) in siblings.iter().zip(directions).enumerate() {
        let mut level_cs = cs.namespace(|| format!("level_{}", level));
        let preimage = order_pair(level_cs.namespace(|| "order"), direction, &current, sibling)?;
        current = sha256_concat(level_cs.namespace(|| "hash_node"), &preimage)?;
    }
    Ok(current)
}

/// Hashes the leaf words and walks the authentication path to the root.
pub fn auth_path<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    leaf_words: &[AllocatedNum<F>],
    siblings: &[DigestVar<F>],
    directions: &[Boolean],
    shape: &MerkleShape,
) -> Result<DigestVar<F>> {
    GadgetError::check_len("merkle siblings", shape.height, siblings.len())?;
    GadgetError::check_len("merkle directions", shape.height, directions.len())?;

    let leaf_digest = sha256_words(cs.namespace(|| "hash_leaf"), leaf_words, &shape.leaf)?;
    root_from_leaf_digest(
        cs.namespace(|| "path"),
        &leaf_digest,
        siblings,
        directions,
        shape.height,
    )
}

/// Computes the root and checks it against a claimed one.
///
/// Returns the computed root, plus the error accumulator in [`CheckMode::Expose`].
pub fn verify_auth_path<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    leaf_words: &[AllocatedNum<F>],
    siblings: &[DigestVar<F>],
    directions: &[Boolean],
    claimed_root: &DigestVar<F>,
    shape: &MerkleShape,
    mode: CheckMode,
) -> Result<(DigestVar<F>, Option<AllocatedNum<F>>)> {
    let root = auth_path(cs.namespace(|| "root"), leaf_words, siblings, directions, shape)?;
    let mismatches = check_digest(cs.namespace(|| "root_check"), &root, claimed_root, mode)?;
    Ok((root, mismatches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::gadgets::arith::{alloc_word, alloc_words};
    use crate::merkle::{self, MerklePath};
    use crate::sha256::NativeDigest;
    use crate::FieldElement;
    use bellpepper_core::test_cs::TestConstraintSystem;

    const LEAF: [u64; 10] = [2_147_483_647; 10];

    fn synthesize(
        cs: &mut TestConstraintSystem<FieldElement>,
        siblings: &[NativeDigest],
        selector: u64,
    ) -> DigestVar<FieldElement> {
        let shape = MerkleShape::membership(siblings.len()).unwrap();
        let leaf = alloc_words(cs.namespace(|| "leaf"), Some(&LEAF[..]), LEAF.len()).unwrap();
        let siblings: Vec<_> = siblings
            .iter()
            .enumerate()
            .map(|(i, s)| DigestVar::alloc(cs.namespace(|| format!("sibling_{}", i)), Some(s)).unwrap())
            .collect();
        let sel = alloc_word(cs.namespace(|| "selector"), Some(selector)).unwrap();
        let dirs = direction_bits_from_selector(cs.namespace(|| "dirs"), &sel, shape.height).unwrap();
        auth_path(cs.namespace(|| "auth"), &leaf, &siblings, &dirs, &shape).unwrap()
    }

    #[test]
    fn test_height_two_selector_three() {
        let siblings = [[1_234_567_890u32; 8], [987_654_321u32; 8]];
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let root = synthesize(&mut cs, &siblings, 3);

        let path = MerklePath::from_selector(siblings.to_vec(), 3).unwrap();
        let expected = merkle::compute_root(&LEAF, 32, &path).unwrap();
        assert_eq!(root.get_value(), Some(expected));
        assert!(cs.is_satisfied());
    }

    #[test]
    fn test_every_selector_matches_native() {
        let siblings = [[11u32; 8], [22u32; 8]];
        for selector in 0..4u64 {
            let mut cs = TestConstraintSystem::<FieldElement>::new();
            let root = synthesize(&mut cs, &siblings, selector);
            let path = MerklePath::from_selector(siblings.to_vec(), selector).unwrap();
            assert_eq!(root.get_value(), merkle::compute_root(&LEAF, 32, &path).ok());
        }
    }

    #[test]
    fn test_missing_sibling_is_a_shape_error() {
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let shape = MerkleShape::membership(2).unwrap();
        let leaf = alloc_words(cs.namespace(|| "leaf"), Some(&LEAF[..]), LEAF.len()).unwrap();
        let sibling = DigestVar::alloc(cs.namespace(|| "s"), Some(&[0u32; 8])).unwrap();
        let result = auth_path(
            cs.namespace(|| "auth"),
            &leaf,
            &[sibling],
            &[Boolean::constant(true), Boolean::constant(true)],
            &shape,
        );
        assert!(matches!(result, Err(GadgetError::ShapeMismatch { .. })));
    }
}
