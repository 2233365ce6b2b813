//! Square-and-multiply exponentiation in the scalar field.

use bellpepper_core::{boolean::Boolean, num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::PrimeFieldBits;
#[cfg(debug_assertions)]
use tracing::debug;

use super::arith::alloc_constant;
use super::bits::exponent_bits;
use super::select::select_or_constant;
use crate::config::ExponentShape;
use crate::error::Result;

/// `base^exponent`, processing exactly `shape.width` exponent bits.
///
/// For widths below the field size an exponent of `2^width` or more leaves the
/// system unsatisfiable rather than silently reducing it.
pub fn mod_exp<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    mut cs: CS,
    base: &AllocatedNum<F>,
    exponent: &AllocatedNum<F>,
    shape: &ExponentShape,
) -> Result<AllocatedNum<F>> {
    let bits = exponent_bits(cs.namespace(|| "exponent_bits"), exponent, shape.width)?;
    Ok(mod_exp_with_bits(cs.namespace(|| "square_multiply"), base, &bits)?)
}

/// Square-and-multiply over an existing little-endian exponent decomposition.
///
/// Every position costs one selection, one multiplication and one squaring,
/// whatever the bit values are.
pub fn mod_exp_with_bits<F: PrimeFieldBits, CS: ConstraintSystem<F>>(
    mut cs: CS,
    base: &AllocatedNum<F>,
    bits: &[Boolean],
) -> std::result::Result<AllocatedNum<F>, SynthesisError> {
    #[cfg(debug_assertions)]
    debug!("mod_exp: {} exponent bits, base known: {}", bits.len(), base.get_value().is_some());

    let mut acc = alloc_constant(cs.namespace(|| "one"), F::ONE)?;
    let mut sq = base.clone();
    for (i, bit) in bits.iter().enumerate() {
        let mut step = cs.namespace(|| format!("step_{}", i));
        let term = select_or_constant(step.namespace(|| "term"), bit, &sq, F::ONE)?;
        acc = acc.mul(step.namespace(|| "multiply"), &term)?;
        sq = sq.square(step.namespace(|| "square"))?;
    }
    Ok(acc)
}
