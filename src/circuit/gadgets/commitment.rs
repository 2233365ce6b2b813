//! Shielded-note commitment chain.
//!
//! Each stage takes the previous stage's digest as an explicit argument:
//! `a_pk = H(a_sk)`, `sn = H(a_sk ++ rho)`, `k = H(r ++ a_pk ++ rho)`,
//! `cm = H(s ++ k ++ v)`. Scalars are single 32-bit words.

use bellpepper_core::{num::AllocatedNum, ConstraintSystem};
use ff::PrimeField;

use super::arith::{alloc_word, alloc_words};
use super::sha256::{sha256_concat, DigestVar};
use crate::config::DIGEST_WORDS;
use crate::error::{GadgetError, Result};
use crate::note::{Note, SpendingKey};

/// Allocates a private spending key as eight words.
pub fn alloc_spending_key<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    key: Option<&SpendingKey>,
) -> Result<Vec<AllocatedNum<F>>> {
    let words = key.map(|k| k.iter().map(|w| u64::from(*w)).collect::<Vec<_>>());
    alloc_words(cs, words.as_deref(), DIGEST_WORDS)
}

/// `a_pk = H(a_sk)`.
pub fn public_key<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    a_sk: &[AllocatedNum<F>],
) -> Result<DigestVar<F>> {
    GadgetError::check_len("spending key words", DIGEST_WORDS, a_sk.len())?;
    sha256_concat(cs, a_sk)
}

/// `sn = H(a_sk ++ rho)`.
pub fn serial_number<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    a_sk: &[AllocatedNum<F>],
    rho: &AllocatedNum<F>,
) -> Result<DigestVar<F>> {
    GadgetError::check_len("spending key words", DIGEST_WORDS, a_sk.len())?;
    let mut words = a_sk.to_vec();
    words.push(rho.clone());
    sha256_concat(cs, &words)
}

/// `k = H(r ++ a_pk ++ rho)`.
pub fn inner_commitment<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    a_pk: &DigestVar<F>,
    rho: &AllocatedNum<F>,
    r: &AllocatedNum<F>,
) -> Result<DigestVar<F>> {
    let mut words = Vec::with_capacity(DIGEST_WORDS + 2);
    words.push(r.clone());
    words.extend_from_slice(a_pk.words());
    words.push(rho.clone());
    sha256_concat(cs, &words)
}

/// `cm = H(s ++ k ++ v)`.
pub fn outer_commitment<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    inner: &DigestVar<F>,
    value: &AllocatedNum<F>,
    s: &AllocatedNum<F>,
) -> Result<DigestVar<F>> {
    let mut words = Vec::with_capacity(DIGEST_WORDS + 2);
    words.push(s.clone());
    words.extend_from_slice(inner.words());
    words.push(value.clone());
    sha256_concat(cs, &words)
}

/// A note held in the circuit.
#[derive(Clone)]
pub struct NoteVar<F: PrimeField> {
    pub a_pk: DigestVar<F>,
    pub value: AllocatedNum<F>,
    pub rho: AllocatedNum<F>,
    pub r: AllocatedNum<F>,
    pub s: AllocatedNum<F>,
}

impl<F: PrimeField> NoteVar<F> {
    /// Allocates every field of a note as a private witness.
    pub fn alloc<CS: ConstraintSystem<F>>(mut cs: CS, note: Option<&Note>) -> Result<Self> {
        let field = |f: fn(&Note) -> u32| note.map(|n| u64::from(f(n)));
        Ok(Self {
            a_pk: DigestVar::alloc(cs.namespace(|| "a_pk"), note.map(|n| &n.a_pk))?,
            value: alloc_word(cs.namespace(|| "value"), field(|n| n.value))?,
            rho: alloc_word(cs.namespace(|| "rho"), field(|n| n.rho))?,
            r: alloc_word(cs.namespace(|| "r"), field(|n| n.r))?,
            s: alloc_word(cs.namespace(|| "s"), field(|n| n.s))?,
        })
    }

    /// The note commitment `cm`.
    pub fn commitment<CS: ConstraintSystem<F>>(&self, mut cs: CS) -> Result<DigestVar<F>> {
        let inner = inner_commitment(cs.namespace(|| "inner"), &self.a_pk, &self.rho, &self.r)?;
        outer_commitment(cs.namespace(|| "outer"), &inner, &self.value, &self.s)
    }
}
