//! ElGamal encryption and decryption gadgets.
//!
//! The randomness `r` is an input allocated by the caller, never sampled here.

use bellpepper_core::{num::AllocatedNum, ConstraintSystem};
use ff::PrimeFieldBits;

use super::arith::divide;
use super::bits::exponent_bits;
use super::modexp::{mod_exp, mod_exp_with_bits};
use crate::config::ExponentShape;
use crate::elgamal::Ciphertext;
use crate::error::Result;

/// An in-circuit ciphertext.
#[derive(Clone)]
pub struct CiphertextVar<F: PrimeFieldBits> {
    /// `g^r`
    pub c1: AllocatedNum<F>,
    /// `m · y^r`
    pub c2: AllocatedNum<F>,
}

impl<F: PrimeFieldBits> CiphertextVar<F> {
    /// Witness value of both components.
    pub fn get_value(&self) -> Option<Ciphertext<F>> {
        Some(Ciphertext {
            c1: self.c1.get_value()?,
            c2: self.c2.get_value()?,
        })
    }
}

/// `(c1, c2) = (g^r, m · y^r)`. Both exponentiations share one decomposition of `r`.
pub fn encrypt<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    mut cs: CS,
    message: &AllocatedNum<F>,
    generator: &AllocatedNum<F>,
    public_key: &AllocatedNum<F>,
    randomness: &AllocatedNum<F>,
    shape: &ExponentShape,
) -> Result<CiphertextVar<F>> {
    let r_bits = exponent_bits(cs.namespace(|| "randomness_bits"), randomness, shape.width)?;
    let c1 = mod_exp_with_bits(cs.namespace(|| "g_pow_r"), generator, &r_bits)?;
    let shared = mod_exp_with_bits(cs.namespace(|| "y_pow_r"), public_key, &r_bits)?;
    let c2 = message.mul(cs.namespace(|| "mask_message"), &shared)?;
    Ok(CiphertextVar { c1, c2 })
}

/// `c2 / c1^x`.
pub fn decrypt<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    mut cs: CS,
    ciphertext: &CiphertextVar<F>,
    secret_key: &AllocatedNum<F>,
    shape: &ExponentShape,
) -> Result<AllocatedNum<F>> {
    let shared = mod_exp(cs.namespace(|| "c1_pow_x"), &ciphertext.c1, secret_key, shape)?;
    Ok(divide(cs.namespace(|| "unmask"), &ciphertext.c2, &shared)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEST_RANDOM_SEED;
    use crate::elgamal::{self, EncryptionRandomness, KeyPair};
    use crate::FieldElement;
    use bellpepper_core::test_cs::TestConstraintSystem;
    use ff::Field;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_encrypt_matches_native() {
        let mut rng = StdRng::seed_from_u64(TEST_RANDOM_SEED);
        let keys = KeyPair::generate(FieldElement::from(5u64), &mut rng);
        let message = FieldElement::from(980_522u64);
        let r = EncryptionRandomness::fresh(&mut rng);

        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let alloc = |cs: &mut TestConstraintSystem<FieldElement>, name: &'static str, v| {
            AllocatedNum::alloc(cs.namespace(|| name), || Ok(v)).unwrap()
        };
        let m = alloc(&mut cs, "m", message);
        let g = alloc(&mut cs, "g", keys.generator);
        let y = alloc(&mut cs, "y", keys.public);
        let rv = alloc(&mut cs, "r", r.value());
        let x = alloc(&mut cs, "x", keys.secret);

        let shape = ExponentShape::default();
        let ct = encrypt(cs.namespace(|| "enc"), &m, &g, &y, &rv, &shape).unwrap();
        assert_eq!(ct.get_value(), Some(elgamal::encrypt(message, keys.generator, keys.public, &r)));

        let plain = decrypt(cs.namespace(|| "dec"), &ct, &x, &shape).unwrap();
        assert_eq!(plain.get_value(), Some(message));
        assert!(cs.is_satisfied());
    }

    #[test]
    fn test_zero_c1_cannot_be_decrypted() {
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let ct = CiphertextVar {
            c1: AllocatedNum::alloc(cs.namespace(|| "c1"), || Ok(FieldElement::ZERO)).unwrap(),
            c2: AllocatedNum::alloc(cs.namespace(|| "c2"), || Ok(FieldElement::ONE)).unwrap(),
        };
        let x = AllocatedNum::alloc(cs.namespace(|| "x"), || Ok(FieldElement::from(3u64))).unwrap();
        let shape = ExponentShape::new(8).unwrap();
        assert!(decrypt(cs.namespace(|| "dec"), &ct, &x, &shape).is_err());
    }
}
