//! Native ElGamal over the multiplicative group of the scalar field.
//!
//! A message `m` is encrypted under `y = g^x` with randomness `r` as
//! `(c1, c2) = (g^r, m * y^r)`, and decrypted as `c2 / c1^x`. Exponents are the
//! canonical integers of field elements, matching the in-circuit bit decomposition.
//!
//! Randomness is always supplied by the caller. Reusing an `r` for two messages under
//! the same key leaks their ratio, so use [`EncryptionRandomness::fresh`] per encryption.

use ff::PrimeField;
use rand::{CryptoRng, RngCore};

use crate::error::{GadgetError, Result};
use crate::utils::pow_native;

/// The per-encryption secret exponent `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionRandomness<F: PrimeField>(pub F);

impl<F: PrimeField> EncryptionRandomness<F> {
    /// Samples a fresh exponent uniformly over the field.
    pub fn fresh<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(F::random(rng))
    }

    /// Wraps an exponent chosen elsewhere (tests, replayed transcripts).
    pub fn from_value(r: F) -> Self {
        Self(r)
    }

    /// The exponent value.
    pub fn value(&self) -> F {
        self.0
    }
}

/// Secret/public key pair with `public = generator^secret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair<F: PrimeField> {
    /// Group generator
    pub generator: F,
    /// Secret exponent `x`
    pub secret: F,
    /// Public key `y = g^x`
    pub public: F,
}

impl<F: PrimeField> KeyPair<F> {
    /// Derives the public key for a secret exponent.
    pub fn from_secret(generator: F, secret: F) -> Self {
        Self {
            generator,
            secret,
            public: pow_native(&generator, &secret),
        }
    }

    /// Samples a random secret exponent.
    pub fn generate<R: RngCore + CryptoRng>(generator: F, rng: &mut R) -> Self {
        Self::from_secret(generator, F::random(rng))
    }
}

/// An ElGamal ciphertext `(c1, c2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ciphertext<F: PrimeField> {
    /// Randomness commitment `g^r`
    pub c1: F,
    /// Masked message `m * y^r`
    pub c2: F,
}

/// Encrypts `message` under `public_key`.
pub fn encrypt<F: PrimeField>(
    message: F,
    generator: F,
    public_key: F,
    randomness: &EncryptionRandomness<F>,
) -> Ciphertext<F> {
    let r = randomness.value();
    Ciphertext {
        c1: pow_native(&generator, &r),
        c2: message * pow_native(&public_key, &r),
    }
}

/// Decrypts a ciphertext with the secret exponent.
pub fn decrypt<F: PrimeField>(ciphertext: &Ciphertext<F>, secret_key: F) -> Result<F> {
    let shared = pow_native(&ciphertext.c1, &secret_key);
    let inverse = Option::<F>::from(shared.invert()).ok_or_else(|| {
        GadgetError::InvalidInput("ciphertext c1 is zero and cannot be decrypted".to_string())
    })?;
    Ok(ciphertext.c2 * inverse)
}
