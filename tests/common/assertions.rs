//! High-level assertion helpers for whole circuits.

#![allow(dead_code)]

use shielded_gadgets::circuit::{synthesize_with_shape, CircuitShape, GadgetCircuit, Synthesized};
use shielded_gadgets::FieldElement;

/// Synthesizes and returns the result, failing the test on shape errors.
pub fn synthesize<C: GadgetCircuit<FieldElement>>(circuit: &C) -> Synthesized<C::Outputs> {
    synthesize_with_shape::<FieldElement, C>(circuit).expect("circuit should synthesize")
}

/// Asserts that the circuit's witness satisfies every constraint.
pub fn assert_satisfied<C: GadgetCircuit<FieldElement>>(circuit: &C) -> Synthesized<C::Outputs> {
    let result = synthesize(circuit);
    assert!(
        result.satisfied,
        "{} circuit should be satisfied, first failure: {:?}",
        C::NAME,
        result.first_unsatisfied
    );
    result
}

/// Asserts that the circuit's witness violates at least one constraint.
pub fn assert_unsatisfied<C: GadgetCircuit<FieldElement>>(circuit: &C) -> Synthesized<C::Outputs> {
    let result = synthesize(circuit);
    assert!(!result.satisfied, "{} circuit should be unsatisfied", C::NAME);
    result
}

/// Asserts two circuits have the same constraint graph.
pub fn assert_same_shape(a: &CircuitShape, b: &CircuitShape, context: &str) {
    assert_eq!(a.num_constraints, b.num_constraints, "{}: constraint count", context);
    assert_eq!(a.num_inputs, b.num_inputs, "{}: input count", context);
    assert_eq!(a.num_aux, b.num_aux, "{}: aux count", context);
    assert_eq!(a.structure_hash, b.structure_hash, "{}: structure hash", context);
}
