//! Equality indicators and digest checks.
//!
//! Every check comes in two forms. The hard form adds equality constraints, so a
//! mismatching witness cannot satisfy the system. The exposed form returns an indicator
//! the caller can publish; it constrains nothing and is only meant for checker circuits
//! whose verifier inspects the output.

use bellpepper_core::{
    boolean::{AllocatedBit, Boolean},
    num::AllocatedNum,
    ConstraintSystem, LinearCombination, SynthesisError,
};
use ff::PrimeField;

use super::sha256::DigestVar;
use crate::error::Result;

/// How a circuit treats a validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// The check is a hard constraint.
    #[default]
    Enforce,
    /// The check result is returned as an output and left unconstrained.
    Expose,
}

/// `1` iff the linear combination evaluates to a nonzero value.
///
/// Constraints: `x · inv = flag` and `x · (1 - flag) = 0`. Together they pin `flag`
/// to the nonzero indicator of `x` for any choice of `inv`.
fn nonzero_of_lc<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    value: Option<F>,
    x: LinearCombination<F>,
) -> std::result::Result<AllocatedBit, SynthesisError> {
    let flag = AllocatedBit::alloc(
        cs.namespace(|| "flag"),
        value.map(|v| !bool::from(v.is_zero())),
    )?;
    let inverse = AllocatedNum::alloc(cs.namespace(|| "inverse"), || {
        let v = value.ok_or(SynthesisError::AssignmentMissing)?;
        Ok(Option::<F>::from(v.invert()).unwrap_or(F::ZERO))
    })?;

    cs.enforce(
        || "x_times_inverse_is_flag",
        |lc| lc + &x,
        |lc| lc + inverse.get_variable(),
        |lc| lc + flag.get_variable(),
    );
    cs.enforce(
        || "x_zero_unless_flag",
        |lc| lc + &x,
        |lc| lc + CS::one() - flag.get_variable(),
        |lc| lc,
    );

    Ok(flag)
}

fn difference<F: PrimeField>(a: &AllocatedNum<F>, b: &AllocatedNum<F>) -> Option<F> {
    Some(a.get_value()? - b.get_value()?)
}

/// Boolean that is true iff `x != 0`.
pub fn nonzero_indicator<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    x: &AllocatedNum<F>,
) -> std::result::Result<Boolean, SynthesisError> {
    let lc = LinearCombination::zero() + x.get_variable();
    nonzero_of_lc(cs, x.get_value(), lc).map(Boolean::from)
}

/// Boolean that is true iff `a == b`.
pub fn is_equal<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    a: &AllocatedNum<F>,
    b: &AllocatedNum<F>,
) -> std::result::Result<Boolean, SynthesisError> {
    let lc = LinearCombination::zero() + a.get_variable() - b.get_variable();
    let differs = nonzero_of_lc(cs, difference(a, b), lc)?;
    Ok(Boolean::from(differs).not())
}

/// Boolean that is true iff `a` equals the constant `c`.
pub fn is_equal_constant<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    a: &AllocatedNum<F>,
    c: F,
) -> std::result::Result<Boolean, SynthesisError> {
    let lc = LinearCombination::zero() + a.get_variable() - (c, CS::one());
    let differs = nonzero_of_lc(cs, a.get_value().map(|v| v - c), lc)?;
    Ok(Boolean::from(differs).not())
}

/// Hard constraint `a == b`.
pub fn enforce_equal<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    a: &AllocatedNum<F>,
    b: &AllocatedNum<F>,
) {
    cs.enforce(
        || "equal",
        |lc| lc + a.get_variable(),
        |lc| lc + CS::one(),
        |lc| lc + b.get_variable(),
    );
}

/// The error accumulator `Σ_j nonzero(computed_j - claimed_j)`; zero iff the digests match.
pub fn digest_mismatch_count<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    computed: &DigestVar<F>,
    claimed: &DigestVar<F>,
) -> Result<AllocatedNum<F>> {
    let mut flags = Vec::with_capacity(computed.words().len());
    for (j, (c, r)) in computed.words().iter().zip(claimed.words()).enumerate() {
        let lc = LinearCombination::zero() + c.get_variable() - r.get_variable();
        flags.push(nonzero_of_lc(
            cs.namespace(|| format!("word_{}_differs", j)),
            difference(c, r),
            lc,
        )?);
    }

    let count = AllocatedNum::alloc(cs.namespace(|| "mismatch_count"), || {
        flags.iter().try_fold(F::ZERO, |acc, f| {
            f.get_value()
                .map(|b| acc + F::from(u64::from(b)))
                .ok_or(SynthesisError::AssignmentMissing)
        })
    })?;
    cs.enforce(
        || "mismatch_count_is_sum",
        |lc| flags.iter().fold(lc, |lc, f| lc + f.get_variable()),
        |lc| lc + CS::one(),
        |lc| lc + count.get_variable(),
    );
    Ok(count)
}

/// `1` iff the digests differ in at least one word.
pub fn digest_mismatch_flag<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    computed: &DigestVar<F>,
    claimed: &DigestVar<F>,
) -> Result<Boolean> {
    let count = digest_mismatch_count(cs.namespace(|| "count"), computed, claimed)?;
    Ok(nonzero_indicator(cs.namespace(|| "flag"), &count)?)
}

/// Hard per-word equality between two digests.
pub fn enforce_digest_equal<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    computed: &DigestVar<F>,
    claimed: &DigestVar<F>,
) {
    for (j, (c, r)) in computed.words().iter().zip(claimed.words()).enumerate() {
        enforce_equal(cs.namespace(|| format!("word_{}", j)), c, r);
    }
}

/// Applies a digest check in the given mode; the exposed mode returns the error accumulator.
pub fn check_digest<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    computed: &DigestVar<F>,
    claimed: &DigestVar<F>,
    mode: CheckMode,
) -> Result<Option<AllocatedNum<F>>> {
    match mode {
        CheckMode::Enforce => {
            enforce_digest_equal(cs.namespace(|| "enforce"), computed, claimed);
            Ok(None)
        }
        CheckMode::Expose => Ok(Some(digest_mismatch_count(
            cs.namespace(|| "accumulate"),
            computed,
            claimed,
        )?)),
    }
}
