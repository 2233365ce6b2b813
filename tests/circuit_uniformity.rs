//! The constraint graph of every circuit depends only on its shape parameters.

use bellpepper_core::{num::AllocatedNum, ConstraintSystem};
use ff::Field;
use shielded_gadgets::{
    circuit::{
        circuit_shape,
        CircuitShape,
        elgamal::ElGamalCircuit,
        gadgets::{mod_exp, CheckMode},
        membership::{MembershipWitness, MerkleMembershipCircuit},
        note_init::NoteInitCircuit,
        shape::ShapeCS,
    },
    elgamal::EncryptionRandomness,
    merkle::{self, MerklePath},
    samples::{self, PourTamper},
    ExponentShape, FieldElement, MerkleShape,
};

mod common;
use common::assertions::{assert_same_shape, assert_satisfied, assert_unsatisfied, synthesize};
use common::fixtures::{random_leaf, TestCS};
use common::seeded_rng;

#[test]
fn test_age_shape_is_independent_of_age() {
    let adult = assert_satisfied(&samples::age_circuit(25, CheckMode::Enforce));
    let minor = assert_unsatisfied(&samples::age_circuit(19, CheckMode::Enforce));
    assert_same_shape(&adult.shape, &minor.shape, "age enforce");

    let adult = assert_satisfied(&samples::age_circuit(25, CheckMode::Expose));
    let minor = assert_satisfied(&samples::age_circuit(19, CheckMode::Expose));
    assert_same_shape(&adult.shape, &minor.shape, "age expose");
    assert_eq!(adult.outputs.ok.unwrap().get_value(), Some(FieldElement::ONE));
    assert_eq!(minor.outputs.ok.unwrap().get_value(), Some(FieldElement::ZERO));
}

#[test]
fn test_modes_differ_in_shape() {
    let enforce = synthesize(&samples::age_circuit(25, CheckMode::Enforce));
    let expose = synthesize(&samples::age_circuit(25, CheckMode::Expose));
    assert_ne!(enforce.shape.num_inputs, expose.shape.num_inputs);
}

#[test]
fn test_membership_shape_is_independent_of_selector() {
    let mut rng = seeded_rng();
    let leaf = random_leaf(&mut rng, 10);
    let siblings = samples::SAMPLE_SIBLINGS.to_vec();

    let mut reference = None;
    for selector in 0..4u64 {
        let path = MerklePath::from_selector(siblings.clone(), selector).unwrap();
        let root = merkle::compute_root(&leaf, 32, &path).unwrap();
        let circuit = MerkleMembershipCircuit::new(
            MerkleShape::membership(2).unwrap(),
            CheckMode::Expose,
            Some(root),
            Some(MembershipWitness {
                leaf_words: leaf.clone(),
                path,
            }),
        );
        let shape = assert_satisfied(&circuit).shape;
        match &reference {
            None => reference = Some(shape),
            Some(first) => assert_same_shape(first, &shape, &format!("selector {}", selector)),
        }
    }
}

#[test]
fn test_blank_membership_matches_assigned_shape() {
    let assigned = synthesize(&samples::membership_circuit(CheckMode::Enforce, false).unwrap());
    let blank = MerkleMembershipCircuit::new(
        MerkleShape::membership(2).unwrap(),
        CheckMode::Enforce,
        None,
        None,
    );
    let blank_shape = circuit_shape::<FieldElement, _>(blank).unwrap();
    assert_same_shape(&assigned.shape, &blank_shape, "blank membership");
}

#[test]
fn test_elgamal_shape_is_independent_of_message_and_randomness() {
    let mut rng = seeded_rng();
    let a = synthesize(&samples::elgamal_circuit(
        FieldElement::ZERO,
        EncryptionRandomness::from_value(FieldElement::ZERO),
        CheckMode::Enforce,
    ));
    let b = synthesize(&samples::elgamal_circuit(
        FieldElement::random(&mut rng),
        EncryptionRandomness::fresh(&mut rng),
        CheckMode::Enforce,
    ));
    assert_same_shape(&a.shape, &b.shape, "elgamal");

    let blank = ElGamalCircuit::<FieldElement>::blank(ExponentShape::default(), CheckMode::Enforce);
    let blank_shape = circuit_shape::<FieldElement, _>(blank).unwrap();
    assert_same_shape(&a.shape, &blank_shape, "blank elgamal");
}

#[test]
fn test_pour_shape_is_independent_of_tampering() {
    for mode in [CheckMode::Enforce, CheckMode::Expose] {
        let honest = synthesize(&samples::pour_circuit(mode, PourTamper::None).unwrap());
        for tamper in [
            PourTamper::Path,
            PourTamper::SerialNumber,
            PourTamper::NewCommitment,
            PourTamper::Balance,
        ] {
            let tampered = synthesize(&samples::pour_circuit(mode, tamper).unwrap());
            assert_same_shape(&honest.shape, &tampered.shape, &format!("{:?} {:?}", mode, tamper));
        }
    }
}

#[test]
fn test_note_init_blank_matches_assigned_shape() {
    let assigned = synthesize(&samples::note_init_circuit());
    let blank_shape = circuit_shape::<FieldElement, _>(NoteInitCircuit::default()).unwrap();
    assert_same_shape(&assigned.shape, &blank_shape, "note init");
}

fn mod_exp_shape(exponent: FieldElement, width: usize) -> CircuitShape {
    let mut cs = ShapeCS::new(TestCS::new());
    let base = AllocatedNum::alloc(cs.namespace(|| "base"), || Ok(FieldElement::from(7u64))).unwrap();
    let e = AllocatedNum::alloc(cs.namespace(|| "exponent"), || Ok(exponent)).unwrap();
    mod_exp(cs.namespace(|| "mod_exp"), &base, &e, &ExponentShape::new(width).unwrap()).unwrap();
    cs.shape()
}

#[test]
fn test_mod_exp_shape_is_independent_of_exponent() {
    for width in [8usize, 254] {
        let zero = mod_exp_shape(FieldElement::ZERO, width);
        let ones = mod_exp_shape(FieldElement::from(255u64), width);
        assert_same_shape(&zero, &ones, &format!("width {}", width));
    }
    let full = mod_exp_shape(-FieldElement::ONE, 254);
    assert_same_shape(&mod_exp_shape(FieldElement::ONE, 254), &full, "p - 1");
}
