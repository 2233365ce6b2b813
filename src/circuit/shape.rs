//! Shape measurement for circuits.
//!
//! A circuit is only usable if its constraint graph is a function of its shape
//! parameters alone. [`ShapeCS`] wraps a constraint system and records how many
//! constraints, inputs and auxiliary variables are allocated, together with a hash of
//! the allocation sequence (namespace, variable and constraint names), so two
//! syntheses with different witnesses can be compared.

use bellpepper_core::{
    test_cs::TestConstraintSystem, Circuit, ConstraintSystem, Index, LinearCombination,
    SynthesisError, Variable,
};
use ff::{PrimeField, PrimeFieldBits};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
#[cfg(debug_assertions)]
use tracing::debug;

use super::GadgetCircuit;
use crate::error::Result;

/// Counts describing a synthesized constraint graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CircuitShape {
    pub num_constraints: usize,
    /// Public inputs, excluding the constant `one`
    pub num_inputs: usize,
    pub num_aux: usize,
    /// Hash of the allocation sequence
    pub structure_hash: u64,
}

/// A constraint system wrapper that tracks circuit structure.
pub struct ShapeCS<F: PrimeField, CS: ConstraintSystem<F>> {
    inner: CS,
    shape: CircuitShape,
    hasher: DefaultHasher,
    _marker: PhantomData<F>,
}

impl<F: PrimeField, CS: ConstraintSystem<F>> ShapeCS<F, CS> {
    pub fn new(inner: CS) -> Self {
        Self {
            inner,
            shape: CircuitShape::default(),
            hasher: DefaultHasher::new(),
            _marker: PhantomData,
        }
    }

    /// The shape recorded so far.
    pub fn shape(&self) -> CircuitShape {
        CircuitShape {
            structure_hash: self.hasher.finish(),
            ..self.shape.clone()
        }
    }

    pub fn into_inner(self) -> CS {
        self.inner
    }

    fn record(&mut self, kind: &str, name: &str) {
        kind.hash(&mut self.hasher);
        name.hash(&mut self.hasher);
    }
}

impl<F: PrimeField, CS: ConstraintSystem<F>> ConstraintSystem<F> for ShapeCS<F, CS> {
    type Root = Self;

    fn alloc<FN, A, AR>(&mut self, annotation: A, f: FN) -> std::result::Result<Variable, SynthesisError>
    where
        FN: FnOnce() -> std::result::Result<F, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        let name: String = annotation().into();
        self.record("aux", &name);
        self.shape.num_aux += 1;
        self.inner.alloc(|| name, f)
    }

    fn alloc_input<FN, A, AR>(
        &mut self,
        annotation: A,
        f: FN,
    ) -> std::result::Result<Variable, SynthesisError>
    where
        FN: FnOnce() -> std::result::Result<F, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        let name: String = annotation().into();
        self.record("input", &name);
        self.shape.num_inputs += 1;
        self.inner.alloc_input(|| name, f)
    }

    fn enforce<A, AR, LA, LB, LC>(&mut self, annotation: A, a: LA, b: LB, c: LC)
    where
        A: FnOnce() -> AR,
        AR: Into<String>,
        LA: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LB: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LC: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
    {
        let name: String = annotation().into();
        self.record("constraint", &name);
        self.shape.num_constraints += 1;
        self.inner.enforce(|| name, a, b, c)
    }

    fn push_namespace<NR, N>(&mut self, name_fn: N)
    where
        NR: Into<String>,
        N: FnOnce() -> NR,
    {
        let name: String = name_fn().into();
        self.record("push", &name);
        self.inner.push_namespace(|| name)
    }

    fn pop_namespace(&mut self) {
        self.record("pop", "");
        self.inner.pop_namespace()
    }

    fn get_root(&mut self) -> &mut Self::Root {
        self
    }
}

/// A constraint system that never evaluates assignments and keeps no constraints.
///
/// Inner system for measuring circuits that carry no witness.
pub struct BlankCS<F: PrimeField> {
    inputs: usize,
    aux: usize,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> BlankCS<F> {
    pub fn new() -> Self {
        Self {
            // Input 0 is the constant `one`
            inputs: 1,
            aux: 0,
            _marker: PhantomData,
        }
    }
}

impl<F: PrimeField> Default for BlankCS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> ConstraintSystem<F> for BlankCS<F> {
    type Root = Self;

    fn alloc<FN, A, AR>(&mut self, _annotation: A, _f: FN) -> std::result::Result<Variable, SynthesisError>
    where
        FN: FnOnce() -> std::result::Result<F, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        self.aux += 1;
        Ok(Variable::new_unchecked(Index::Aux(self.aux - 1)))
    }

    fn alloc_input<FN, A, AR>(
        &mut self,
        _annotation: A,
        _f: FN,
    ) -> std::result::Result<Variable, SynthesisError>
    where
        FN: FnOnce() -> std::result::Result<F, SynthesisError>,
        A: FnOnce() -> AR,
        AR: Into<String>,
    {
        self.inputs += 1;
        Ok(Variable::new_unchecked(Index::Input(self.inputs - 1)))
    }

    fn enforce<A, AR, LA, LB, LC>(&mut self, _annotation: A, _a: LA, _b: LB, _c: LC)
    where
        A: FnOnce() -> AR,
        AR: Into<String>,
        LA: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LB: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
        LC: FnOnce(LinearCombination<F>) -> LinearCombination<F>,
    {
    }

    fn push_namespace<NR, N>(&mut self, _name_fn: N)
    where
        NR: Into<String>,
        N: FnOnce() -> NR,
    {
    }

    fn pop_namespace(&mut self) {}

    fn get_root(&mut self) -> &mut Self::Root {
        self
    }
}

/// The result of synthesizing a circuit against a [`TestConstraintSystem`].
pub struct Synthesized<O> {
    pub shape: CircuitShape,
    pub satisfied: bool,
    /// Path of the first failing constraint, if any
    pub first_unsatisfied: Option<String>,
    pub outputs: O,
}

/// Synthesizes a circuit, measuring its shape and checking satisfaction.
pub fn synthesize_with_shape<F, C>(circuit: &C) -> Result<Synthesized<C::Outputs>>
where
    F: PrimeFieldBits,
    C: GadgetCircuit<F>,
{
    let mut cs = ShapeCS::new(TestConstraintSystem::<F>::new());
    let outputs = circuit.synthesize_outputs(&mut cs)?;
    let shape = cs.shape();
    let inner = cs.into_inner();

    let satisfied = inner.is_satisfied();
    let first_unsatisfied = inner.which_is_unsatisfied().map(str::to_string);

    #[cfg(debug_assertions)]
    debug!(
        "{}: {} constraints, {} inputs, {} aux, satisfied: {}",
        C::NAME,
        shape.num_constraints,
        shape.num_inputs,
        shape.num_aux,
        satisfied
    );

    Ok(Synthesized {
        shape,
        satisfied,
        first_unsatisfied,
        outputs,
    })
}

/// Shape of any bellpepper circuit. Assignments are never evaluated, so circuits
/// without a witness can be measured.
pub fn circuit_shape<F: PrimeField, C: Circuit<F>>(
    circuit: C,
) -> std::result::Result<CircuitShape, SynthesisError> {
    let mut cs = ShapeCS::new(BlankCS::<F>::new());
    circuit.synthesize(&mut cs)?;
    Ok(cs.shape())
}
