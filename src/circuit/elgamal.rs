//! ElGamal encrypt-then-decrypt circuit.
//!
//! Public: generator `g`, public key `y`, ciphertext `(c1, c2)`. Private: message,
//! secret key and the encryption randomness. The circuit encrypts the message, decrypts
//! the ciphertext with the secret key, and either enforces that the plaintext equals
//! the message or publishes the plaintext.

use bellpepper_core::{num::AllocatedNum, Circuit, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;

use super::gadgets::elgamal::{decrypt, encrypt, CiphertextVar};
use super::gadgets::equality::{enforce_equal, CheckMode};
use super::{display_num, GadgetCircuit, PublicOutputs};
use crate::config::ExponentShape;
use crate::elgamal::EncryptionRandomness;
use crate::error::Result;

/// Private inputs of the ElGamal circuit.
#[derive(Debug, Clone, Copy)]
pub struct ElGamalWitness<F: PrimeFieldBits> {
    pub message: F,
    pub secret_key: F,
    pub randomness: EncryptionRandomness<F>,
}

#[derive(Debug, Clone)]
pub struct ElGamalCircuit<F: PrimeFieldBits> {
    pub shape: ExponentShape,
    pub mode: CheckMode,
    pub generator: Option<F>,
    pub public_key: Option<F>,
    pub witness: Option<ElGamalWitness<F>>,
}

impl<F: PrimeFieldBits> ElGamalCircuit<F> {
    pub fn new(
        shape: ExponentShape,
        mode: CheckMode,
        generator: Option<F>,
        public_key: Option<F>,
        witness: Option<ElGamalWitness<F>>,
    ) -> Self {
        Self {
            shape,
            mode,
            generator,
            public_key,
            witness,
        }
    }

    /// Circuit with no assignments, for shape measurement.
    pub fn blank(shape: ExponentShape, mode: CheckMode) -> Self {
        Self::new(shape, mode, None, None, None)
    }
}

/// Outputs of [`ElGamalCircuit`].
pub struct ElGamalOutputs<F: PrimeFieldBits> {
    pub ciphertext: CiphertextVar<F>,
    pub plaintext: AllocatedNum<F>,
    /// The allocated encryption randomness; private, returned for inspection in tests
    pub randomness: AllocatedNum<F>,
}

impl<F: PrimeFieldBits> PublicOutputs for ElGamalOutputs<F> {
    fn labelled(&self) -> Vec<(String, String)> {
        vec![
            ("c1".to_string(), display_num(&self.ciphertext.c1)),
            ("c2".to_string(), display_num(&self.ciphertext.c2)),
            ("plaintext".to_string(), display_num(&self.plaintext)),
        ]
    }
}

fn alloc_private<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    cs: CS,
    value: Option<F>,
) -> std::result::Result<AllocatedNum<F>, SynthesisError> {
    AllocatedNum::alloc(cs, || value.ok_or(SynthesisError::AssignmentMissing))
}

fn alloc_public<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    cs: CS,
    value: Option<F>,
) -> std::result::Result<AllocatedNum<F>, SynthesisError> {
    AllocatedNum::alloc_input(cs, || value.ok_or(SynthesisError::AssignmentMissing))
}

impl<F: PrimeFieldBits> GadgetCircuit<F> for ElGamalCircuit<F> {
    const NAME: &'static str = "elgamal";
    type Outputs = ElGamalOutputs<F>;

    fn synthesize_outputs<CS: ConstraintSystem<F>>(&self, cs: &mut CS) -> Result<ElGamalOutputs<F>> {
        let generator = alloc_public(cs.namespace(|| "generator"), self.generator)?;
        let public_key = alloc_public(cs.namespace(|| "public_key"), self.public_key)?;
        let message = alloc_private(cs.namespace(|| "message"), self.witness.map(|w| w.message))?;
        let secret_key = alloc_private(cs.namespace(|| "secret_key"), self.witness.map(|w| w.secret_key))?;
        let randomness = alloc_private(
            cs.namespace(|| "randomness"),
            self.witness.map(|w| w.randomness.value()),
        )?;

        let ciphertext = encrypt(
            cs.namespace(|| "encrypt"),
            &message,
            &generator,
            &public_key,
            &randomness,
            &self.shape,
        )?;
        ciphertext.c1.inputize(cs.namespace(|| "c1_output"))?;
        ciphertext.c2.inputize(cs.namespace(|| "c2_output"))?;

        let plaintext = decrypt(cs.namespace(|| "decrypt"), &ciphertext, &secret_key, &self.shape)?;
        match self.mode {
            CheckMode::Enforce => enforce_equal(cs.namespace(|| "round_trip"), &plaintext, &message),
            CheckMode::Expose => plaintext.inputize(cs.namespace(|| "plaintext_output"))?,
        }

        Ok(ElGamalOutputs {
            ciphertext,
            plaintext,
            randomness,
        })
    }
}

impl<F: PrimeFieldBits> Circuit<F> for ElGamalCircuit<F> {
    fn synthesize<CS: ConstraintSystem<F>>(self, cs: &mut CS) -> std::result::Result<(), SynthesisError> {
        self.synthesize_outputs(cs)?;
        Ok(())
    }
}
