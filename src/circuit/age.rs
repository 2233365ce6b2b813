//! Age-threshold circuit.
//!
//! Proves that a private age is at least a public minimum while tying it to a public
//! SHA-256 digest of its decimal string: the prover knows `age` and the ASCII digits
//! `d` with `age == decimal(d)`, `H(d) == claimed` and `age >= min_age`.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;
use serde::{Deserialize, Serialize};
#[cfg(debug_assertions)]
use tracing::debug;

use super::gadgets::arith::{alloc_word, alloc_words, boolean_to_num};
use super::gadgets::compare::{enforce_decimal_encoding, is_greater_or_equal_constant};
use super::gadgets::equality::{digest_mismatch_flag, enforce_digest_equal, CheckMode};
use super::gadgets::sha256::{sha256_words, DigestVar};
use super::{display_digest, display_num, GadgetCircuit, PublicOutputs};
use crate::config::{WordShape, AGE_BITS, CHAR_BITS};
use crate::error::{GadgetError, Result};
use crate::sha256::NativeDigest;

/// Private inputs of the age circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeWitness {
    pub age: u32,
    /// ASCII decimal digits of `age`, most significant first
    pub digits: Vec<u8>,
}

impl AgeWitness {
    /// Witness whose digits are the canonical decimal spelling of `age`.
    pub fn new(age: u32) -> Self {
        Self {
            age,
            digits: age.to_string().into_bytes(),
        }
    }
}

/// Age-threshold circuit over a fixed number of decimal digits.
#[derive(Debug, Clone)]
pub struct AgeCircuit {
    pub min_age: u64,
    pub digit_count: usize,
    pub mode: CheckMode,
    /// Public digest of the digit string
    pub claimed_digest: Option<NativeDigest>,
    pub witness: Option<AgeWitness>,
}

impl AgeCircuit {
    pub fn new(
        min_age: u64,
        digit_count: usize,
        mode: CheckMode,
        claimed_digest: Option<NativeDigest>,
        witness: Option<AgeWitness>,
    ) -> Self {
        Self {
            min_age,
            digit_count,
            mode,
            claimed_digest,
            witness,
        }
    }
}

/// Outputs of [`AgeCircuit`].
pub struct AgeOutputs<F: PrimeFieldBits> {
    /// Digest of the private digit string
    pub digest: DigestVar<F>,
    /// Public `1`/`0` verdict, only in [`CheckMode::Expose`]
    pub ok: Option<AllocatedNum<F>>,
}

impl<F: PrimeFieldBits> PublicOutputs for AgeOutputs<F> {
    fn labelled(&self) -> Vec<(String, String)> {
        let mut out = vec![("digest".to_string(), display_digest(&self.digest))];
        if let Some(ok) = &self.ok {
            out.push(("ok".to_string(), display_num(ok)));
        }
        out
    }
}

impl<F: PrimeFieldBits> GadgetCircuit<F> for AgeCircuit {
    const NAME: &'static str = "age";
    type Outputs = AgeOutputs<F>;

    fn synthesize_outputs<CS: ConstraintSystem<F>>(&self, cs: &mut CS) -> Result<AgeOutputs<F>> {
        if let Some(w) = &self.witness {
            GadgetError::check_len("age digits", self.digit_count, w.digits.len())?;
        }
        let digit_shape = WordShape::new(self.digit_count, CHAR_BITS)?;

        #[cfg(debug_assertions)]
        debug!(
            "AgeCircuit: min_age {}, {} digits, mode {:?}, has witness: {}",
            self.min_age,
            self.digit_count,
            self.mode,
            self.witness.is_some()
        );

        let claimed = DigestVar::alloc_input(cs.namespace(|| "claimed_digest"), self.claimed_digest.as_ref())?;
        let age = alloc_word(
            cs.namespace(|| "age"),
            self.witness.as_ref().map(|w| u64::from(w.age)),
        )?;
        let digit_values = self
            .witness
            .as_ref()
            .map(|w| w.digits.iter().map(|d| u64::from(*d)).collect::<Vec<_>>());
        let digits = alloc_words(cs.namespace(|| "digits"), digit_values.as_deref(), self.digit_count)?;

        let digest = sha256_words(cs.namespace(|| "hash_digits"), &digits, &digit_shape)?;
        enforce_decimal_encoding(cs.namespace(|| "age_is_digits"), &age, &digits)?;
        let old_enough =
            is_greater_or_equal_constant(cs.namespace(|| "old_enough"), &age, self.min_age, AGE_BITS)?;

        let ok = match self.mode {
            CheckMode::Enforce => {
                Boolean::enforce_equal(
                    cs.namespace(|| "enforce_old_enough"),
                    &old_enough,
                    &Boolean::constant(true),
                )?;
                enforce_digest_equal(cs.namespace(|| "enforce_digest"), &digest, &claimed);
                None
            }
            CheckMode::Expose => {
                let mismatch = digest_mismatch_flag(cs.namespace(|| "digest_check"), &digest, &claimed)?;
                let verdict = Boolean::and(cs.namespace(|| "verdict"), &old_enough, &mismatch.not())?;
                let ok = boolean_to_num(cs.namespace(|| "ok"), &verdict)?;
                ok.inputize(cs.namespace(|| "ok_output"))?;
                Some(ok)
            }
        };

        Ok(AgeOutputs { digest, ok })
    }
}

impl<F: PrimeFieldBits> Circuit<F> for AgeCircuit {
    fn synthesize<CS: ConstraintSystem<F>>(self, cs: &mut CS) -> std::result::Result<(), SynthesisError> {
        GadgetCircuit::<F>::synthesize_outputs(&self, cs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sha256::hash_bytes;
    use crate::FieldElement;
    use bellpepper_core::test_cs::TestConstraintSystem;

    fn run(age: u32, mode: CheckMode) -> (bool, Option<FieldElement>) {
        let circuit = AgeCircuit::new(20, 2, mode, Some(hash_bytes(b"25")), Some(AgeWitness::new(age)));
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let outputs = GadgetCircuit::<FieldElement>::synthesize_outputs(&circuit, &mut cs).unwrap();
        (cs.is_satisfied(), outputs.ok.and_then(|n| n.get_value()))
    }

    #[test]
    fn test_enforced_age_check() {
        assert!(run(25, CheckMode::Enforce).0);
        assert!(!run(19, CheckMode::Enforce).0);
        assert!(!run(52, CheckMode::Enforce).0);
    }

    #[test]
    fn test_exposed_age_check() {
        assert_eq!(run(25, CheckMode::Expose), (true, Some(FieldElement::from(1u64))));
        assert_eq!(run(19, CheckMode::Expose), (true, Some(FieldElement::from(0u64))));
    }

    #[test]
    fn test_digit_count_mismatch_is_a_shape_error() {
        let circuit = AgeCircuit::new(20, 2, CheckMode::Enforce, None, Some(AgeWitness::new(100)));
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        assert!(matches!(
            GadgetCircuit::<FieldElement>::synthesize_outputs(&circuit, &mut cs),
            Err(GadgetError::ShapeMismatch { .. })
        ));
    }
}
