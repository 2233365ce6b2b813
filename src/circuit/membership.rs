//! Merkle membership circuit: a private leaf preimage lies under a public root.

use bellpepper_core::{num::AllocatedNum, Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;
#[cfg(debug_assertions)]
use tracing::debug;

use super::gadgets::arith::{alloc_word, alloc_words};
use super::gadgets::equality::CheckMode;
use super::gadgets::merkle::{direction_bits_from_selector, verify_auth_path};
use super::gadgets::sha256::DigestVar;
use super::{display_digest, display_num, GadgetCircuit, PublicOutputs};
use crate::config::MerkleShape;
use crate::error::{GadgetError, Result};
use crate::merkle::MerklePath;
use crate::sha256::NativeDigest;

/// Private inputs: the leaf words and their authentication path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipWitness {
    pub leaf_words: Vec<u64>,
    pub path: MerklePath,
}

#[derive(Debug, Clone)]
pub struct MerkleMembershipCircuit {
    pub shape: MerkleShape,
    pub mode: CheckMode,
    pub claimed_root: Option<NativeDigest>,
    pub witness: Option<MembershipWitness>,
}

impl MerkleMembershipCircuit {
    pub fn new(
        shape: MerkleShape,
        mode: CheckMode,
        claimed_root: Option<NativeDigest>,
        witness: Option<MembershipWitness>,
    ) -> Self {
        Self {
            shape,
            mode,
            claimed_root,
            witness,
        }
    }

    fn check_witness(&self) -> Result<()> {
        if let Some(w) = &self.witness {
            GadgetError::check_len("leaf words", self.shape.leaf.words, w.leaf_words.len())?;
            GadgetError::check_len("path siblings", self.shape.height, w.path.siblings.len())?;
            GadgetError::check_len("path directions", self.shape.height, w.path.directions.len())?;
        }
        Ok(())
    }
}

/// Outputs of [`MerkleMembershipCircuit`].
pub struct MembershipOutputs<F: PrimeFieldBits> {
    pub root: DigestVar<F>,
    /// Error accumulator, only in [`CheckMode::Expose`]; zero iff the roots match
    pub mismatches: Option<AllocatedNum<F>>,
}

impl<F: PrimeFieldBits> PublicOutputs for MembershipOutputs<F> {
    fn labelled(&self) -> Vec<(String, String)> {
        let mut out = vec![("root".to_string(), display_digest(&self.root))];
        if let Some(m) = &self.mismatches {
            out.push(("mismatches".to_string(), display_num(m)));
        }
        out
    }
}

impl<F: PrimeFieldBits> GadgetCircuit<F> for MerkleMembershipCircuit {
    const NAME: &'static str = "merkle";
    type Outputs = MembershipOutputs<F>;

    fn synthesize_outputs<CS: ConstraintSystem<F>>(
        &self,
        cs: &mut CS,
    ) -> Result<MembershipOutputs<F>> {
        self.check_witness()?;
        let height = self.shape.height;

        #[cfg(debug_assertions)]
        debug!(
            "MerkleMembershipCircuit: height {}, leaf {}x{} bits, mode {:?}",
            height, self.shape.leaf.words, self.shape.leaf.word_bits, self.mode
        );

        let claimed_root = DigestVar::alloc_input(cs.namespace(|| "claimed_root"), self.claimed_root.as_ref())?;
        let leaf = alloc_words(
            cs.namespace(|| "leaf"),
            self.witness.as_ref().map(|w| w.leaf_words.as_slice()),
            self.shape.leaf.words,
        )?;
        let siblings = (0..height)
            .map(|i| {
                DigestVar::alloc(
                    cs.namespace(|| format!("sibling_{}", i)),
                    self.witness.as_ref().map(|w| &w.path.siblings[i]),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let selector = alloc_word(
            cs.namespace(|| "selector"),
            self.witness.as_ref().map(|w| w.path.selector()),
        )?;
        let directions = direction_bits_from_selector(cs.namespace(|| "directions"), &selector, height)?;

        let (root, mismatches) = verify_auth_path(
            cs.namespace(|| "membership"),
            &leaf,
            &siblings,
            &directions,
            &claimed_root,
            &self.shape,
            self.mode,
        )?;
        if let Some(m) = &mismatches {
            root.inputize(cs.namespace(|| "root_output"))?;
            m.inputize(cs.namespace(|| "mismatches_output"))?;
        }

        Ok(MembershipOutputs { root, mismatches })
    }
}

impl<F: PrimeFieldBits> Circuit<F> for MerkleMembershipCircuit {
    fn synthesize<CS: ConstraintSystem<F>>(self, cs: &mut CS) -> std::result::Result<(), SynthesisError> {
        GadgetCircuit::<F>::synthesize_outputs(&self, cs)?;
        Ok(())
    }
}
