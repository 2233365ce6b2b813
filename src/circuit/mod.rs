//! Circuit generators assembled from the gadgets.
//!
//! - `gadgets/`: branch-free building blocks (selection, exponentiation, hashing, Merkle paths)
//! - `age`, `elgamal`, `membership`, `note_init`, `pour`: complete circuits
//! - `shape`: constraint-count measurement and satisfaction checks
//!
//! Every circuit holds its witness as `Option`s, so the same value synthesizes either
//! with assignments or, with `None`, purely for its shape. The constraint graph depends
//! only on the shape parameters a circuit is built with.

pub mod age;
pub mod elgamal;
pub mod gadgets;
pub mod membership;
pub mod note_init;
pub mod pour;
pub mod shape;

pub use age::AgeCircuit;
pub use elgamal::ElGamalCircuit;
pub use membership::MerkleMembershipCircuit;
pub use note_init::NoteInitCircuit;
pub use pour::PourCircuit;
pub use shape::{circuit_shape, synthesize_with_shape, BlankCS, CircuitShape, Synthesized};

use bellpepper_core::{num::AllocatedNum, ConstraintSystem};
use ff::PrimeFieldBits;

use crate::error::Result;
use crate::utils::field_to_display;
use gadgets::DigestVar;

/// A circuit whose synthesis returns typed outputs.
///
/// `bellpepper_core::Circuit::synthesize` is implemented on top of this and discards the
/// outputs; callers that want them (tests, the CLI report) call `synthesize_outputs`.
pub trait GadgetCircuit<F: PrimeFieldBits> {
    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Values produced by synthesis.
    type Outputs: PublicOutputs;

    /// Allocates the circuit in `cs` and returns its outputs.
    fn synthesize_outputs<CS: ConstraintSystem<F>>(&self, cs: &mut CS) -> Result<Self::Outputs>;
}

/// Outputs that can be listed as `(label, value)` pairs.
pub trait PublicOutputs {
    fn labelled(&self) -> Vec<(String, String)>;
}

pub(crate) fn display_num<F: PrimeFieldBits>(num: &AllocatedNum<F>) -> String {
    num.get_value()
        .map(|v| field_to_display(&v))
        .unwrap_or_else(|| "<unassigned>".to_string())
}

pub(crate) fn display_digest<F: PrimeFieldBits>(digest: &DigestVar<F>) -> String {
    digest
        .get_value()
        .map(|words| {
            words
                .iter()
                .map(|w| format!("{:08x}", w))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_else(|| "<unassigned>".to_string())
}
