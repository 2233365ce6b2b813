//! Small arithmetic gadgets: pinned constants, sums and field division.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::PrimeField;

use crate::error::GadgetError;

/// Allocates `value` and constrains it to be exactly that constant.
pub fn alloc_constant<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    value: F,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let num = AllocatedNum::alloc(cs.namespace(|| "constant"), || Ok(value))?;
    cs.enforce(
        || "constant_is_fixed",
        |lc| lc + num.get_variable(),
        |lc| lc + CS::one(),
        |lc| lc + (value, CS::one()),
    );
    Ok(num)
}

/// Allocates a private integer word.
pub fn alloc_word<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    value: Option<u64>,
) -> Result<AllocatedNum<F>, SynthesisError> {
    AllocatedNum::alloc(cs, || {
        value.map(F::from).ok_or(SynthesisError::AssignmentMissing)
    })
}

/// Allocates a public integer word.
pub fn alloc_word_input<F: PrimeField, CS: ConstraintSystem<F>>(
    cs: CS,
    value: Option<u64>,
) -> Result<AllocatedNum<F>, SynthesisError> {
    AllocatedNum::alloc_input(cs, || {
        value.map(F::from).ok_or(SynthesisError::AssignmentMissing)
    })
}

/// Allocates `count` private words; `values`, when known, must have that length.
pub fn alloc_words<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    values: Option<&[u64]>,
    count: usize,
) -> crate::error::Result<Vec<AllocatedNum<F>>> {
    if let Some(v) = values {
        GadgetError::check_len("words", count, v.len())?;
    }
    let words = (0..count)
        .map(|i| {
            alloc_word(
                cs.namespace(|| format!("word_{}", i)),
                values.map(|v| v[i]),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(words)
}

/// Converts a Boolean into a 0/1 number.
pub fn boolean_to_num<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    bit: &Boolean,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let num = AllocatedNum::alloc(cs.namespace(|| "bit_value"), || {
        bit.get_value()
            .map(|b| F::from(u64::from(b)))
            .ok_or(SynthesisError::AssignmentMissing)
    })?;
    cs.enforce(
        || "bit_value_matches",
        |lc| lc + &bit.lc(CS::one(), F::ONE),
        |lc| lc + CS::one(),
        |lc| lc + num.get_variable(),
    );
    Ok(num)
}

/// Sum of the given numbers as a single new number.
pub fn sum<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    terms: &[AllocatedNum<F>],
) -> Result<AllocatedNum<F>, SynthesisError> {
    let total = AllocatedNum::alloc(cs.namespace(|| "sum"), || {
        terms.iter().try_fold(F::ZERO, |acc, t| {
            t.get_value()
                .map(|v| acc + v)
                .ok_or(SynthesisError::AssignmentMissing)
        })
    })?;
    cs.enforce(
        || "sum_constraint",
        |lc| terms.iter().fold(lc, |lc, t| lc + t.get_variable()),
        |lc| lc + CS::one(),
        |lc| lc + total.get_variable(),
    );
    Ok(total)
}

/// Computes `a + b - c`, the operand left over after `c` was selected from `{a, b}`.
pub fn add_sub<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    a: &AllocatedNum<F>,
    b: &AllocatedNum<F>,
    c: &AllocatedNum<F>,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let out = AllocatedNum::alloc(cs.namespace(|| "add_sub"), || {
        let a = a.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        let b = b.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        let c = c.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        Ok(a + b - c)
    })?;
    cs.enforce(
        || "add_sub_constraint",
        |lc| lc + a.get_variable() + b.get_variable() - c.get_variable(),
        |lc| lc + CS::one(),
        |lc| lc + out.get_variable(),
    );
    Ok(out)
}

/// Field division `numerator · denominator⁻¹`.
///
/// The denominator is constrained to be invertible, so a zero denominator leaves the
/// system unsatisfiable; with a known zero value witness computation fails with
/// [`SynthesisError::DivisionByZero`].
pub fn divide<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    numerator: &AllocatedNum<F>,
    denominator: &AllocatedNum<F>,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let inverse = AllocatedNum::alloc(cs.namespace(|| "denominator_inverse"), || {
        let d = denominator
            .get_value()
            .ok_or(SynthesisError::AssignmentMissing)?;
        Option::<F>::from(d.invert()).ok_or(SynthesisError::DivisionByZero)
    })?;
    cs.enforce(
        || "denominator_invertible",
        |lc| lc + denominator.get_variable(),
        |lc| lc + inverse.get_variable(),
        |lc| lc + CS::one(),
    );

    let quotient = AllocatedNum::alloc(cs.namespace(|| "quotient"), || {
        let n = numerator
            .get_value()
            .ok_or(SynthesisError::AssignmentMissing)?;
        let inv = inverse.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        Ok(n * inv)
    })?;
    cs.enforce(
        || "quotient_times_denominator",
        |lc| lc + denominator.get_variable(),
        |lc| lc + quotient.get_variable(),
        |lc| lc + numerator.get_variable(),
    );

    Ok(quotient)
}
