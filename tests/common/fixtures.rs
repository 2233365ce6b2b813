//! Test fixtures: deterministic randomness and witness construction.

#![allow(dead_code)]

use bellpepper_core::{
    boolean::{AllocatedBit, Boolean},
    num::AllocatedNum,
    test_cs::TestConstraintSystem,
    ConstraintSystem,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use shielded_gadgets::{config::TEST_RANDOM_SEED, FieldElement, MerklePath, NativeDigest};

pub type TestCS = TestConstraintSystem<FieldElement>;

/// Deterministic RNG shared by the tests.
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_RANDOM_SEED)
}

/// Allocates a private number under `name`.
pub fn alloc_num(cs: &mut TestCS, name: &str, value: FieldElement) -> AllocatedNum<FieldElement> {
    AllocatedNum::alloc(cs.namespace(|| name.to_string()), || Ok(value))
        .expect("allocation with a known value")
}

/// Allocates a private bit under `name`.
pub fn alloc_bit(cs: &mut TestCS, name: &str, value: bool) -> Boolean {
    Boolean::from(
        AllocatedBit::alloc(cs.namespace(|| name.to_string()), Some(value))
            .expect("allocation with a known value"),
    )
}

pub fn random_digest<R: RngCore>(rng: &mut R) -> NativeDigest {
    let mut digest = [0u32; 8];
    for word in digest.iter_mut() {
        *word = rng.next_u32();
    }
    digest
}

/// Random leaf of `words` 32-bit words.
pub fn random_leaf<R: RngCore>(rng: &mut R, words: usize) -> Vec<u64> {
    (0..words).map(|_| u64::from(rng.next_u32())).collect()
}

/// Random siblings with random direction bits.
pub fn random_path<R: RngCore>(rng: &mut R, height: usize) -> MerklePath {
    MerklePath {
        siblings: (0..height).map(|_| random_digest(rng)).collect(),
        directions: (0..height).map(|_| rng.gen::<bool>()).collect(),
    }
}
