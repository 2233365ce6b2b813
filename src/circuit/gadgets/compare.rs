//! Comparison against public constants and decimal-digit encodings.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::PrimeField;

use super::bits::to_bits_le_fixed;
use crate::error::{GadgetError, Result};

/// Largest width supported by the comparison; the shifted value needs `width + 1` bits.
pub const MAX_COMPARE_BITS: usize = 63;

fn check_width(width: usize, constant: u64) -> Result<()> {
    if width == 0 || width > MAX_COMPARE_BITS {
        return Err(GadgetError::InvalidShape(format!(
            "comparison width {} outside 1..={}",
            width, MAX_COMPARE_BITS
        )));
    }
    if constant >> width != 0 {
        return Err(GadgetError::InvalidShape(format!(
            "constant {} does not fit in {} bits",
            constant, width
        )));
    }
    Ok(())
}

/// Boolean that is true iff `a > constant`, with `a` range-checked to `width` bits.
///
/// With `a, c < 2^w`, the value `a + (2^w - 1 - c)` reaches `2^w` exactly when `a > c`,
/// so the answer is bit `w` of its `w + 1` bit decomposition.
pub fn is_greater_than_constant<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    a: &AllocatedNum<F>,
    constant: u64,
    width: usize,
) -> Result<Boolean> {
    check_width(width, constant)?;
    to_bits_le_fixed(cs.namespace(|| "range"), a, width)?;

    let offset = F::from(((1u64 << width) - 1) - constant);
    let shifted = AllocatedNum::alloc(cs.namespace(|| "shifted"), || {
        a.get_value()
            .map(|v| v + offset)
            .ok_or(SynthesisError::AssignmentMissing)
    })?;
    cs.enforce(
        || "shifted_constraint",
        |lc| lc + a.get_variable() + (offset, CS::one()),
        |lc| lc + CS::one(),
        |lc| lc + shifted.get_variable(),
    );

    let bits = to_bits_le_fixed(cs.namespace(|| "shifted_bits"), &shifted, width + 1)?;
    Ok(bits[width].clone())
}

/// Boolean that is true iff `a >= constant`.
pub fn is_greater_or_equal_constant<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    a: &AllocatedNum<F>,
    constant: u64,
    width: usize,
) -> Result<Boolean> {
    match constant.checked_sub(1) {
        Some(below) => is_greater_than_constant(cs, a, below, width),
        None => {
            check_width(width, constant)?;
            to_bits_le_fixed(cs.namespace(|| "range"), a, width)?;
            Ok(Boolean::constant(true))
        }
    }
}

/// Constrains `value` to be the decimal number spelled by ASCII `digits`, most
/// significant first, with every character in `'0'..='9'`.
pub fn enforce_decimal_encoding<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    value: &AllocatedNum<F>,
    digits: &[AllocatedNum<F>],
) -> Result<()> {
    if digits.is_empty() || digits.len() > 19 {
        return Err(GadgetError::InvalidShape(format!(
            "decimal encoding of {} digits is not supported",
            digits.len()
        )));
    }

    let zero_char = F::from(u64::from(b'0'));
    let ten = F::from(10u64);
    let mut weights = Vec::with_capacity(digits.len());
    let mut weight = F::ONE;
    for _ in 0..digits.len() {
        weights.push(weight);
        weight *= ten;
    }
    weights.reverse();

    let mut numerals = Vec::with_capacity(digits.len());
    for (i, ch) in digits.iter().enumerate() {
        let mut dcs = cs.namespace(|| format!("digit_{}", i));
        let numeral = AllocatedNum::alloc(dcs.namespace(|| "numeral"), || {
            ch.get_value()
                .map(|c| c - zero_char)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        dcs.enforce(
            || "numeral_from_char",
            |lc| lc + ch.get_variable() - (zero_char, CS::one()),
            |lc| lc + CS::one(),
            |lc| lc + numeral.get_variable(),
        );
        let above_nine = is_greater_than_constant(dcs.namespace(|| "at_most_nine"), &numeral, 9, 4)?;
        Boolean::enforce_equal(
            dcs.namespace(|| "is_digit"),
            &above_nine,
            &Boolean::constant(false),
        )?;
        numerals.push(numeral);
    }

    cs.enforce(
        || "decimal_value",
        |lc| {
            numerals
                .iter()
                .zip(&weights)
                .fold(lc, |lc, (n, w)| lc + (*w, n.get_variable()))
        },
        |lc| lc + CS::one(),
        |lc| lc + value.get_variable(),
    );
    Ok(())
}
