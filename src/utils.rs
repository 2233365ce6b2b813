//! Stateless field helpers for the shielded gadgets library

use ff::PrimeField;
use nova_snark::{provider::Bn256EngineKZG, traits::Engine};

use crate::error::{GadgetError, Result};

/// A type alias for the BN254 scalar field every circuit in this crate is built over.
pub type FieldElement = <Bn256EngineKZG as Engine>::Scalar;

/// Little-endian canonical bytes of a field element.
///
/// This helper centralizes our endianness assumption and is covered by tests.
/// If upstream representation changes, tests will fail here.
pub fn field_to_le_bytes<F: PrimeField>(element: &F) -> Vec<u8> {
    element.to_repr().as_ref().to_vec()
}

/// Bit `index` (little-endian) of the canonical representation; `false` past the end.
pub fn field_bit_le<F: PrimeField>(element: &F, index: usize) -> bool {
    let repr = element.to_repr();
    repr.as_ref()
        .get(index / 8)
        .map(|byte| (byte >> (index % 8)) & 1 == 1)
        .unwrap_or(false)
}

/// Little-endian `u64` limbs of the canonical representation, as used by `pow_vartime`.
pub fn field_to_u64_limbs<F: PrimeField>(element: &F) -> Vec<u64> {
    field_to_le_bytes(element)
        .chunks(8)
        .map(|chunk| {
            let mut limb = [0u8; 8];
            limb[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(limb)
        })
        .collect()
}

/// Returns the element as a `u64` if it is smaller than 2^64.
pub fn field_to_u64<F: PrimeField>(element: &F) -> Option<u64> {
    let limbs = field_to_u64_limbs(element);
    if limbs.iter().skip(1).all(|limb| *limb == 0) {
        limbs.first().copied()
    } else {
        None
    }
}

/// Parses a decimal string, tolerating leading zeros.
pub fn field_from_decimal<F: PrimeField>(s: &str) -> Result<F> {
    let trimmed = s.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        return if s.trim().is_empty() {
            Err(GadgetError::InvalidInput("empty decimal string".to_string()))
        } else {
            Ok(F::ZERO)
        };
    }
    F::from_str_vartime(trimmed)
        .ok_or_else(|| GadgetError::InvalidInput(format!("not a field element: {}", s)))
}

/// Human-readable rendering: decimal below 2^64, big-endian hex otherwise.
pub fn field_to_display<F: PrimeField>(element: &F) -> String {
    match field_to_u64(element) {
        Some(small) => small.to_string(),
        None => {
            let hex: String = field_to_le_bytes(element)
                .iter()
                .rev()
                .map(|b| format!("{:02x}", b))
                .collect();
            format!("0x{}", hex)
        }
    }
}

/// Out-of-circuit `base^exponent mod p`, treating the exponent as its canonical integer.
pub fn pow_native<F: PrimeField>(base: &F, exponent: &F) -> F {
    base.pow_vartime(field_to_u64_limbs(exponent))
}

/// `2^bits` as a field element.
pub fn two_pow<F: PrimeField>(bits: usize) -> F {
    let mut acc = F::ONE;
    for _ in 0..bits {
        acc = acc.double();
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff::Field;

    #[test]
    fn test_le_byte_order() {
        let x = FieldElement::from(0x0102u64);
        let bytes = field_to_le_bytes(&x);
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes[1], 0x01);
        assert!(field_bit_le(&x, 1));
        assert!(!field_bit_le(&x, 0));
        assert!(!field_bit_le(&x, 10_000));
    }

    #[test]
    fn test_u64_roundtrip_and_overflow() {
        assert_eq!(field_to_u64(&FieldElement::from(u64::MAX)), Some(u64::MAX));
        let big = FieldElement::from(u64::MAX) + FieldElement::ONE;
        assert_eq!(field_to_u64(&big), None);
        assert_eq!(field_to_u64(&-FieldElement::ONE), None);
    }

    #[test]
    fn test_decimal_parsing() {
        let x: FieldElement = field_from_decimal("0987654321").unwrap();
        assert_eq!(x, FieldElement::from(987_654_321u64));
        let zero: FieldElement = field_from_decimal("000").unwrap();
        assert_eq!(zero, FieldElement::ZERO);
        assert!(field_from_decimal::<FieldElement>("").is_err());
        assert!(field_from_decimal::<FieldElement>("12a").is_err());
    }

    #[test]
    fn test_pow_native_matches_repeated_multiplication() {
        let base = FieldElement::from(5u64);
        let mut expected = FieldElement::ONE;
        for _ in 0..37 {
            expected *= base;
        }
        assert_eq!(pow_native(&base, &FieldElement::from(37u64)), expected);
        // Fermat: a^(p-1) = 1
        assert_eq!(pow_native(&base, &-FieldElement::ONE), FieldElement::ONE);
    }

    #[test]
    fn test_display() {
        assert_eq!(field_to_display(&FieldElement::from(42u64)), "42");
        assert!(field_to_display(&-FieldElement::ONE).starts_with("0x30644e72"));
        assert_eq!(two_pow::<FieldElement>(10), FieldElement::from(1024u64));
    }
}
