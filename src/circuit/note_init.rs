//! Note initialization circuit.
//!
//! Derives both owners' public keys, the old note's serial number and the commitments
//! of two notes that share value, nonce and salts but belong to different owners.

use bellpepper_core::{Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;

use super::gadgets::arith::alloc_word_input;
use super::gadgets::commitment::{alloc_spending_key, public_key, serial_number, NoteVar};
use super::gadgets::sha256::DigestVar;
use super::{display_digest, GadgetCircuit, PublicOutputs};
use crate::error::Result;
use crate::note::SpendingKey;

/// Public note parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteParams {
    pub value: u32,
    pub rho: u32,
    pub r: u32,
    pub s: u32,
}

/// Private spending keys of the old and new owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInitWitness {
    pub old_key: SpendingKey,
    pub new_key: SpendingKey,
}

#[derive(Debug, Clone, Default)]
pub struct NoteInitCircuit {
    pub params: Option<NoteParams>,
    pub witness: Option<NoteInitWitness>,
}

impl NoteInitCircuit {
    pub fn new(params: Option<NoteParams>, witness: Option<NoteInitWitness>) -> Self {
        Self { params, witness }
    }
}

/// Outputs of [`NoteInitCircuit`], all public.
pub struct NoteInitOutputs<F: PrimeFieldBits> {
    pub old_public_key: DigestVar<F>,
    pub new_public_key: DigestVar<F>,
    pub old_serial_number: DigestVar<F>,
    pub old_commitment: DigestVar<F>,
    pub new_commitment: DigestVar<F>,
}

impl<F: PrimeFieldBits> PublicOutputs for NoteInitOutputs<F> {
    fn labelled(&self) -> Vec<(String, String)> {
        [
            ("a_old_pk", &self.old_public_key),
            ("a_new_pk", &self.new_public_key),
            ("sn_old", &self.old_serial_number),
            ("cm_old", &self.old_commitment),
            ("cm_new", &self.new_commitment),
        ]
        .into_iter()
        .map(|(label, digest)| (label.to_string(), display_digest(digest)))
        .collect()
    }
}

impl<F: PrimeFieldBits> GadgetCircuit<F> for NoteInitCircuit {
    const NAME: &'static str = "note-init";
    type Outputs = NoteInitOutputs<F>;

    fn synthesize_outputs<CS: ConstraintSystem<F>>(&self, cs: &mut CS) -> Result<NoteInitOutputs<F>> {
        let param = |f: fn(&NoteParams) -> u32| self.params.as_ref().map(|p| u64::from(f(p)));
        let value = alloc_word_input(cs.namespace(|| "value"), param(|p| p.value))?;
        let rho = alloc_word_input(cs.namespace(|| "rho"), param(|p| p.rho))?;
        let r = alloc_word_input(cs.namespace(|| "r"), param(|p| p.r))?;
        let s = alloc_word_input(cs.namespace(|| "s"), param(|p| p.s))?;

        let old_key = alloc_spending_key(cs.namespace(|| "a_old_sk"), self.witness.as_ref().map(|w| &w.old_key))?;
        let new_key = alloc_spending_key(cs.namespace(|| "a_new_sk"), self.witness.as_ref().map(|w| &w.new_key))?;

        let old_public_key = public_key(cs.namespace(|| "a_old_pk"), &old_key)?;
        let new_public_key = public_key(cs.namespace(|| "a_new_pk"), &new_key)?;
        let old_serial_number = serial_number(cs.namespace(|| "sn_old"), &old_key, &rho)?;

        let old_note = NoteVar {
            a_pk: old_public_key.clone(),
            value: value.clone(),
            rho: rho.clone(),
            r: r.clone(),
            s: s.clone(),
        };
        let new_note = NoteVar {
            a_pk: new_public_key.clone(),
            value,
            rho,
            r,
            s,
        };
        let old_commitment = old_note.commitment(cs.namespace(|| "cm_old"))?;
        let new_commitment = new_note.commitment(cs.namespace(|| "cm_new"))?;

        let outputs = NoteInitOutputs {
            old_public_key,
            new_public_key,
            old_serial_number,
            old_commitment,
            new_commitment,
        };
        outputs.old_public_key.inputize(cs.namespace(|| "a_old_pk_output"))?;
        outputs.new_public_key.inputize(cs.namespace(|| "a_new_pk_output"))?;
        outputs.old_serial_number.inputize(cs.namespace(|| "sn_old_output"))?;
        outputs.old_commitment.inputize(cs.namespace(|| "cm_old_output"))?;
        outputs.new_commitment.inputize(cs.namespace(|| "cm_new_output"))?;
        Ok(outputs)
    }
}

impl<F: PrimeFieldBits> Circuit<F> for NoteInitCircuit {
    fn synthesize<CS: ConstraintSystem<F>>(self, cs: &mut CS) -> std::result::Result<(), SynthesisError> {
        GadgetCircuit::<F>::synthesize_outputs(&self, cs)?;
        Ok(())
    }
}
