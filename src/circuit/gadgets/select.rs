//! Conditional selection gadget for circuit operations.
//!
//! This is the only form of conditional logic the gadgets use: both candidates are
//! always present in the constraint system and a boolean picks one of them through
//! the affine combination `bit * when_one + (1 - bit) * when_zero`.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::PrimeField;

fn bit_as_field<F: PrimeField>(bit: &Boolean) -> Result<F, SynthesisError> {
    bit.get_value()
        .map(|b| F::from(u64::from(b)))
        .ok_or(SynthesisError::AssignmentMissing)
}

/// Selects between two AllocatedNums based on a Boolean.
/// If `bit` is true, returns `when_one`. If `bit` is false, returns `when_zero`.
pub fn select<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    bit: &Boolean,
    when_one: &AllocatedNum<F>,
    when_zero: &AllocatedNum<F>,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let result = AllocatedNum::alloc(cs.namespace(|| "select_result"), || {
        let b = bit_as_field::<F>(bit)?;
        let one = when_one.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        let zero = when_zero
            .get_value()
            .ok_or(SynthesisError::AssignmentMissing)?;
        Ok(zero + b * (one - zero))
    })?;

    // Enforce: result = when_zero + bit * (when_one - when_zero)
    // Rearranging: bit * (when_one - when_zero) = result - when_zero
    cs.enforce(
        || "select_constraint",
        |lc| lc + &bit.lc(CS::one(), F::ONE),
        |lc| lc + when_one.get_variable() - when_zero.get_variable(),
        |lc| lc + result.get_variable() - when_zero.get_variable(),
    );

    Ok(result)
}

/// Selects between an AllocatedNum and a field constant.
/// If `bit` is true, returns `when_one`. If `bit` is false, returns `when_zero`.
pub fn select_or_constant<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    bit: &Boolean,
    when_one: &AllocatedNum<F>,
    when_zero: F,
) -> Result<AllocatedNum<F>, SynthesisError> {
    let result = AllocatedNum::alloc(cs.namespace(|| "select_result"), || {
        let b = bit_as_field::<F>(bit)?;
        let one = when_one.get_value().ok_or(SynthesisError::AssignmentMissing)?;
        Ok(when_zero + b * (one - when_zero))
    })?;

    cs.enforce(
        || "select_constant_constraint",
        |lc| lc + &bit.lc(CS::one(), F::ONE),
        |lc| lc + when_one.get_variable() - (when_zero, CS::one()),
        |lc| lc + result.get_variable() - (when_zero, CS::one()),
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldElement;
    use bellpepper_core::{boolean::AllocatedBit, test_cs::TestConstraintSystem};
    use ff::Field;

    fn alloc_bit(cs: &mut TestConstraintSystem<FieldElement>, value: bool) -> Boolean {
        Boolean::from(AllocatedBit::alloc(cs.namespace(|| "bit"), Some(value)).unwrap())
    }

    #[test]
    fn test_select_both_branches() {
        for bit in [true, false] {
            let mut cs = TestConstraintSystem::<FieldElement>::new();
            let a = AllocatedNum::alloc(cs.namespace(|| "a"), || Ok(FieldElement::from(7u64)))
                .unwrap();
            let b = AllocatedNum::alloc(cs.namespace(|| "b"), || Ok(FieldElement::from(9u64)))
                .unwrap();
            let flag = alloc_bit(&mut cs, bit);
            let out = select(cs.namespace(|| "select"), &flag, &a, &b).unwrap();
            let expected = if bit { 7u64 } else { 9u64 };
            assert_eq!(out.get_value(), Some(FieldElement::from(expected)));
            assert!(cs.is_satisfied());
        }
    }

    #[test]
    fn test_select_constant_branch() {
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let a = AllocatedNum::alloc(cs.namespace(|| "a"), || Ok(FieldElement::from(7u64))).unwrap();
        let flag = alloc_bit(&mut cs, false);
        let out = select_or_constant(cs.namespace(|| "select"), &flag, &a, FieldElement::ONE)
            .unwrap();
        assert_eq!(out.get_value(), Some(FieldElement::ONE));
        assert!(cs.is_satisfied());
    }

    #[test]
    fn test_select_accepts_constant_condition() {
        let mut cs = TestConstraintSystem::<FieldElement>::new();
        let a = AllocatedNum::alloc(cs.namespace(|| "a"), || Ok(FieldElement::from(3u64))).unwrap();
        let b = AllocatedNum::alloc(cs.namespace(|| "b"), || Ok(FieldElement::from(4u64))).unwrap();
        let out = select(cs.namespace(|| "select"), &Boolean::constant(true), &a, &b).unwrap();
        assert_eq!(out.get_value(), Some(FieldElement::from(3u64)));
        assert!(cs.is_satisfied());
    }
}
