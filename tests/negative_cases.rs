//! Shape errors and witness failures.

use bellpepper_core::{num::AllocatedNum, ConstraintSystem, SynthesisError};
use ff::Field;
use shielded_gadgets::{
    circuit::age::{AgeCircuit, AgeWitness},
    circuit::gadgets::{
        arith::alloc_words,
        compare::{enforce_decimal_encoding, is_greater_than_constant, MAX_COMPARE_BITS},
        divide, DigestVar,
    },
    samples, CheckMode, FieldElement, GadgetCircuit, GadgetError, MerkleShape, WordShape,
};

mod common;
use common::assertions::assert_unsatisfied;
use common::fixtures::TestCS;
use common::alloc_num;

#[test]
fn test_known_zero_denominator_is_division_by_zero() {
    let mut cs = TestCS::new();
    let n = alloc_num(&mut cs, "n", FieldElement::from(5u64));
    let d = alloc_num(&mut cs, "d", FieldElement::ZERO);
    let err = divide(cs.namespace(|| "div"), &n, &d).err().unwrap();
    assert!(matches!(err, SynthesisError::DivisionByZero));
}

#[test]
fn test_forged_inverse_of_zero_is_unsatisfiable() {
    let mut cs = TestCS::new();
    let n = alloc_num(&mut cs, "n", FieldElement::from(5u64));
    let d = alloc_num(&mut cs, "d", FieldElement::from(2u64));
    divide(cs.namespace(|| "div"), &n, &d).unwrap();
    assert!(cs.is_satisfied());
    cs.set("d/num", FieldElement::ZERO);
    assert!(!cs.is_satisfied());
}

#[test]
fn test_invalid_word_shapes() {
    assert!(matches!(WordShape::new(3, 7), Err(GadgetError::InvalidShape(_))));
    assert!(matches!(WordShape::new(3, 72), Err(GadgetError::InvalidShape(_))));
    assert!(matches!(WordShape::new(0, 8), Err(GadgetError::InvalidShape(_))));
    assert!(MerkleShape::new(2, 10, 33).is_err());
}

#[test]
fn test_word_count_mismatch() {
    let mut cs = TestCS::new();
    let err = alloc_words::<FieldElement, _>(cs.namespace(|| "w"), Some(&[1u64, 2, 3][..]), 4)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        GadgetError::ShapeMismatch {
            expected: 4,
            got: 3,
            ..
        }
    ));
}

#[test]
fn test_digest_needs_eight_words() {
    let mut cs = TestCS::new();
    let words: Vec<AllocatedNum<FieldElement>> = (0..7)
        .map(|i| alloc_num(&mut cs, &format!("w{}", i), FieldElement::from(i as u64)))
        .collect();
    assert!(DigestVar::from_words(words).is_err());
}

#[test]
fn test_comparison_width_limits() {
    let mut cs = TestCS::new();
    let a = alloc_num(&mut cs, "a", FieldElement::from(3u64));
    assert!(is_greater_than_constant(cs.namespace(|| "zero"), &a, 0, 0).is_err());
    assert!(
        is_greater_than_constant(cs.namespace(|| "wide"), &a, 0, MAX_COMPARE_BITS + 1).is_err()
    );
    assert!(is_greater_than_constant(cs.namespace(|| "big"), &a, 300, 8).is_err());
    assert_eq!(cs.num_constraints(), 0);
}

#[test]
fn test_comparison_rejects_out_of_range_operand() {
    let mut cs = TestCS::new();
    let a = alloc_num(&mut cs, "a", FieldElement::from(256u64));
    is_greater_than_constant(cs.namespace(|| "gt"), &a, 10, 8).unwrap();
    assert!(!cs.is_satisfied());
}

#[test]
fn test_decimal_encoding_rejects_non_digits() {
    let mut cs = TestCS::new();
    let value = alloc_num(&mut cs, "value", FieldElement::from(25u64));
    let digits = vec![
        alloc_num(&mut cs, "d0", FieldElement::from(u64::from(b'2'))),
        alloc_num(&mut cs, "d1", FieldElement::from(u64::from(b'5'))),
    ];
    enforce_decimal_encoding(cs.namespace(|| "ok"), &value, &digits).unwrap();
    assert!(cs.is_satisfied());

    // ':' is one past '9'; "1:" would spell 20 if the digit range were not checked
    let mut cs = TestCS::new();
    let value = alloc_num(&mut cs, "value", FieldElement::from(20u64));
    let digits = vec![
        alloc_num(&mut cs, "d0", FieldElement::from(u64::from(b'1'))),
        alloc_num(&mut cs, "d1", FieldElement::from(u64::from(b':'))),
    ];
    enforce_decimal_encoding(cs.namespace(|| "colon"), &value, &digits).unwrap();
    assert!(!cs.is_satisfied());

    let mut cs = TestCS::new();
    let value = alloc_num(&mut cs, "value", FieldElement::from(25u64));
    assert!(enforce_decimal_encoding(cs.namespace(|| "empty"), &value, &[]).is_err());
}

#[test]
fn test_age_digits_must_match_digit_count() {
    let circuit = AgeCircuit::new(
        samples::SAMPLE_MIN_AGE,
        3,
        CheckMode::Enforce,
        Some(samples::SAMPLE_AGE_DIGEST),
        Some(AgeWitness::new(25)),
    );
    let mut cs = TestCS::new();
    let err = GadgetCircuit::<FieldElement>::synthesize_outputs(&circuit, &mut cs)
        .err()
        .unwrap();
    assert!(matches!(err, GadgetError::ShapeMismatch { .. }));
}

#[test]
fn test_age_with_inconsistent_digits_is_unsatisfiable() {
    let witness = AgeWitness {
        age: 30,
        digits: b"25".to_vec(),
    };
    let circuit = AgeCircuit::new(
        samples::SAMPLE_MIN_AGE,
        2,
        CheckMode::Enforce,
        Some(samples::SAMPLE_AGE_DIGEST),
        Some(witness),
    );
    assert_unsatisfied(&circuit);
}

#[test]
fn test_shape_errors_surface_as_unsatisfiable_through_bellpepper() {
    let err: SynthesisError = GadgetError::InvalidShape("height".to_string()).into();
    assert!(matches!(err, SynthesisError::Unsatisfiable));
    let inner: SynthesisError = GadgetError::Synthesis(SynthesisError::AssignmentMissing).into();
    assert!(matches!(inner, SynthesisError::AssignmentMissing));
}
