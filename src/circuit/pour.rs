//! Pour circuit: spend one committed note into a new note plus a public amount.
//!
//! Public: the tree root `rt`, the old serial number `sn_old`, the new commitment
//! `cm_new` and the public value `v_pub`. Private: the old note, its owner's spending
//! key and Merkle path, and the new note. The circuit shows that
//!
//! - the old note belongs to the key (`a_old_pk = H(a_old_sk)`),
//! - `sn_old = H(a_old_sk ++ rho_old)`,
//! - the hash of the old commitment is a leaf of the tree under `rt`,
//! - `cm_new` commits to the new note,
//! - `v_old = v_new + v_pub`.

use bellpepper_core::{num::AllocatedNum, Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;
#[cfg(debug_assertions)]
use tracing::debug;

use super::gadgets::arith::{alloc_word, alloc_word_input, boolean_to_num, sum};
use super::gadgets::bits::to_bits_le_fixed;
use super::gadgets::commitment::{alloc_spending_key, public_key, serial_number, NoteVar};
use super::gadgets::equality::{check_digest, enforce_digest_equal, enforce_equal, is_equal, CheckMode};
use super::gadgets::merkle::{auth_path, direction_bits_from_selector};
use super::gadgets::sha256::DigestVar;
use super::{display_digest, display_num, GadgetCircuit, PublicOutputs};
use crate::config::{MerkleShape, NOTE_FIELD_BITS};
use crate::error::{GadgetError, Result};
use crate::merkle::MerklePath;
use crate::note::{Note, SpendingKey};
use crate::sha256::NativeDigest;

/// Public statement of a pour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PourStatement {
    pub root: NativeDigest,
    pub old_serial_number: NativeDigest,
    pub new_commitment: NativeDigest,
    pub public_value: u32,
}

/// Private inputs of a pour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PourWitness {
    pub old_key: SpendingKey,
    pub old_note: Note,
    pub path: MerklePath,
    pub new_note: Note,
}

#[derive(Debug, Clone)]
pub struct PourCircuit {
    /// Commitment tree shape; the leaf preimage is the commitment digest
    pub shape: MerkleShape,
    pub mode: CheckMode,
    pub statement: Option<PourStatement>,
    pub witness: Option<PourWitness>,
}

impl PourCircuit {
    pub fn new(
        height: usize,
        mode: CheckMode,
        statement: Option<PourStatement>,
        witness: Option<PourWitness>,
    ) -> Result<Self> {
        Ok(Self {
            shape: MerkleShape::commitment_tree(height)?,
            mode,
            statement,
            witness,
        })
    }
}

/// Outputs of [`PourCircuit`].
pub struct PourOutputs<F: PrimeFieldBits> {
    pub root: DigestVar<F>,
    pub old_serial_number: DigestVar<F>,
    pub new_commitment: DigestVar<F>,
    /// Number of failed checks, only in [`CheckMode::Expose`]
    pub errors: Option<AllocatedNum<F>>,
}

impl<F: PrimeFieldBits> PublicOutputs for PourOutputs<F> {
    fn labelled(&self) -> Vec<(String, String)> {
        let mut out = vec![
            ("rt".to_string(), display_digest(&self.root)),
            ("sn_old".to_string(), display_digest(&self.old_serial_number)),
            ("cm_new".to_string(), display_digest(&self.new_commitment)),
        ];
        if let Some(errors) = &self.errors {
            out.push(("errors".to_string(), display_num(errors)));
        }
        out
    }
}

impl<F: PrimeFieldBits> GadgetCircuit<F> for PourCircuit {
    const NAME: &'static str = "pour";
    type Outputs = PourOutputs<F>;

    fn synthesize_outputs<CS: ConstraintSystem<F>>(&self, cs: &mut CS) -> Result<PourOutputs<F>> {
        let height = self.shape.height;
        if let Some(w) = &self.witness {
            GadgetError::check_len("path siblings", height, w.path.siblings.len())?;
            GadgetError::check_len("path directions", height, w.path.directions.len())?;
        }

        #[cfg(debug_assertions)]
        debug!(
            "PourCircuit: height {}, mode {:?}, has witness: {}",
            height,
            self.mode,
            self.witness.is_some()
        );

        let statement = self.statement.as_ref();
        let witness = self.witness.as_ref();

        let rt = DigestVar::alloc_input(cs.namespace(|| "rt"), statement.map(|s| &s.root))?;
        let sn_claimed = DigestVar::alloc_input(
            cs.namespace(|| "sn_old"),
            statement.map(|s| &s.old_serial_number),
        )?;
        let cm_claimed = DigestVar::alloc_input(
            cs.namespace(|| "cm_new"),
            statement.map(|s| &s.new_commitment),
        )?;
        let public_value = alloc_word_input(
            cs.namespace(|| "v_pub"),
            statement.map(|s| u64::from(s.public_value)),
        )?;

        let old_key = alloc_spending_key(cs.namespace(|| "a_old_sk"), witness.map(|w| &w.old_key))?;
        let old_note = NoteVar::alloc(cs.namespace(|| "old_note"), witness.map(|w| &w.old_note))?;
        let new_note = NoteVar::alloc(cs.namespace(|| "new_note"), witness.map(|w| &w.new_note))?;

        // Ownership is a property of the witness alone and is always enforced.
        let derived_pk = public_key(cs.namespace(|| "a_old_pk"), &old_key)?;
        enforce_digest_equal(cs.namespace(|| "owns_old_note"), &derived_pk, &old_note.a_pk);

        let serial = serial_number(cs.namespace(|| "derive_sn_old"), &old_key, &old_note.rho)?;
        let sn_errors = check_digest(cs.namespace(|| "sn_check"), &serial, &sn_claimed, self.mode)?;

        let old_commitment = old_note.commitment(cs.namespace(|| "cm_old"))?;
        let siblings = (0..height)
            .map(|i| {
                DigestVar::alloc(
                    cs.namespace(|| format!("sibling_{}", i)),
                    witness.map(|w| &w.path.siblings[i]),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let selector = alloc_word(cs.namespace(|| "selector"), witness.map(|w| w.path.selector()))?;
        let directions = direction_bits_from_selector(cs.namespace(|| "directions"), &selector, height)?;
        // The tree leaf is the hash of the commitment, not the commitment itself.
        let root = auth_path(
            cs.namespace(|| "membership"),
            old_commitment.words(),
            &siblings,
            &directions,
            &self.shape,
        )?;
        let root_errors = check_digest(cs.namespace(|| "root_check"), &root, &rt, self.mode)?;

        let new_commitment = new_note.commitment(cs.namespace(|| "derive_cm_new"))?;
        let cm_errors = check_digest(cs.namespace(|| "cm_check"), &new_commitment, &cm_claimed, self.mode)?;

        // Note values are range-checked by the commitment hashes; with v_pub checked
        // here the sum cannot wrap around the field.
        to_bits_le_fixed(cs.namespace(|| "v_pub_range"), &public_value, NOTE_FIELD_BITS)?;
        let outgoing = sum(
            cs.namespace(|| "outgoing_value"),
            &[new_note.value.clone(), public_value],
        )?;

        let errors = match self.mode {
            CheckMode::Enforce => {
                enforce_equal(cs.namespace(|| "balance"), &old_note.value, &outgoing);
                None
            }
            CheckMode::Expose => {
                let balanced = is_equal(cs.namespace(|| "balance"), &old_note.value, &outgoing)?;
                let unbalanced = boolean_to_num(cs.namespace(|| "unbalanced"), &balanced.not())?;
                let mut terms: Vec<_> = [sn_errors, root_errors, cm_errors]
                    .into_iter()
                    .flatten()
                    .collect();
                terms.push(unbalanced);
                let errors = sum(cs.namespace(|| "errors"), &terms)?;
                errors.inputize(cs.namespace(|| "errors_output"))?;
                Some(errors)
            }
        };

        Ok(PourOutputs {
            root,
            old_serial_number: serial,
            new_commitment,
            errors,
        })
    }
}

impl<F: PrimeFieldBits> Circuit<F> for PourCircuit {
    fn synthesize<CS: ConstraintSystem<F>>(self, cs: &mut CS) -> std::result::Result<(), SynthesisError> {
        GadgetCircuit::<F>::synthesize_outputs(&self, cs)?;
        Ok(())
    }
}
