//! Fixed-width bit decomposition.
//!
//! The width is always a construction parameter, never derived from a witness value,
//! so the number of allocated bits is part of the circuit shape.

use bellpepper_core::{
    boolean::{AllocatedBit, Boolean},
    num::AllocatedNum,
    ConstraintSystem, LinearCombination, SynthesisError,
};
use ff::{PrimeField, PrimeFieldBits};

use crate::utils::field_to_le_bytes;

/// Decomposes `value` into exactly `width` little-endian bits.
///
/// Each bit is booleanity-constrained and the packing `Σ bit_i · 2^i = value` is enforced,
/// so the system is unsatisfiable whenever `value >= 2^width`.
pub fn to_bits_le_fixed<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    value: &AllocatedNum<F>,
    width: usize,
) -> Result<Vec<Boolean>, SynthesisError> {
    let bytes = value.get_value().map(|v| field_to_le_bytes(&v));

    let mut bits = Vec::with_capacity(width);
    let mut packed = LinearCombination::<F>::zero();
    let mut coeff = F::ONE;
    for i in 0..width {
        let bit_value = bytes.as_ref().map(|b| {
            b.get(i / 8)
                .map(|byte| (byte >> (i % 8)) & 1 == 1)
                .unwrap_or(false)
        });
        let bit = AllocatedBit::alloc(cs.namespace(|| format!("bit_{}", i)), bit_value)?;
        packed = packed + (coeff, bit.get_variable());
        coeff = coeff.double();
        bits.push(Boolean::from(bit));
    }

    cs.enforce(
        || "packing",
        |lc| lc + &packed,
        |lc| lc + CS::one(),
        |lc| lc + value.get_variable(),
    );

    Ok(bits)
}

/// Decomposes an exponent into `width` little-endian bits.
///
/// From the field's bit length upwards the canonical (strict) decomposition is used,
/// which rules out the aliases `value + k·p` that a plain packing constraint would
/// admit, and the remaining positions are constant `false`.
pub fn exponent_bits<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    mut cs: CS,
    exponent: &AllocatedNum<F>,
    width: usize,
) -> Result<Vec<Boolean>, SynthesisError> {
    if width >= F::NUM_BITS as usize {
        let mut bits = exponent.to_bits_le_strict(cs.namespace(|| "strict_bits"))?;
        bits.resize(width, Boolean::constant(false));
        Ok(bits)
    } else {
        to_bits_le_fixed(cs.namespace(|| "fixed_bits"), exponent, width)
    }
}

/// Packs little-endian bits into a new number (used to re-expose a decomposed value).
pub fn pack_bits_le<F: PrimeField, CS: ConstraintSystem<F>>(
    mut cs: CS,
    bits: &[Boolean],
) -> Result<AllocatedNum<F>, SynthesisError> {
    let mut packed = LinearCombination::<F>::zero();
    let mut value = Some(F::ZERO);
    let mut coeff = F::ONE;
    for bit in bits {
        packed = packed + &bit.lc(CS::one(), coeff);
        value = value.and_then(|v| bit.get_value().map(|b| v + coeff * F::from(u64::from(b))));
        coeff = coeff.double();
    }

    let num = AllocatedNum::alloc(cs.namespace(|| "packed"), || {
        value.ok_or(SynthesisError::AssignmentMissing)
    })?;
    cs.enforce(
        || "packing",
        |lc| lc + &packed,
        |lc| lc + CS::one(),
        |lc| lc + num.get_variable(),
    );
    Ok(num)
}
