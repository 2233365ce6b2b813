//! Shielded gadgets library
//!
//! Branch-free R1CS gadgets and circuits over the BN254 scalar field: selection,
//! square-and-multiply exponentiation, ElGamal, SHA-256 Merkle paths and shielded-note
//! commitments. Every loop bound is a shape parameter, so a circuit's constraint graph
//! never depends on the witness.
//!
//! ## Main Components
//!
//! - [`circuit::gadgets`]: the gadgets, built on `bellpepper-core`
//! - [`circuit`]: complete circuits (age threshold, ElGamal, Merkle membership, note
//!   initialization, pour) and shape measurement
//! - [`sha256`], [`merkle`], [`note`], [`elgamal`]: native reference implementations
//!   used to prepare witnesses and cross-check circuits
//! - [`config`]: constants and shape structs
//! - [`samples`]: consistent sample inputs for every circuit
//!
//! ## Error Handling
//!
//! Shape errors (wrong input lengths, unsupported widths) are reported as
//! [`GadgetError`] before the offending gadget allocates anything. Invalid witness
//! values never raise; they leave the constraint system unsatisfiable.
//!
//! ## Quick Start
//! ```rust,no_run
//! use bellpepper_core::test_cs::TestConstraintSystem;
//! use shielded_gadgets::{circuit::GadgetCircuit, samples, CheckMode, FieldElement};
//!
//! let circuit = samples::membership_circuit(CheckMode::Enforce, false)?;
//! let mut cs = TestConstraintSystem::<FieldElement>::new();
//! let outputs = GadgetCircuit::<FieldElement>::synthesize_outputs(&circuit, &mut cs)?;
//! assert!(cs.is_satisfied());
//! assert!(outputs.root.get_value().is_some());
//! # Ok::<(), shielded_gadgets::GadgetError>(())
//! ```

pub mod circuit;
pub mod config;
pub mod elgamal;
pub mod error;
pub mod merkle;
pub mod metrics;
pub mod note;
pub mod samples;
pub mod sha256;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use circuit::gadgets::{CheckMode, DigestVar};
pub use circuit::{
    AgeCircuit, ElGamalCircuit, GadgetCircuit, MerkleMembershipCircuit, NoteInitCircuit,
    PourCircuit,
};
pub use config::{ExponentShape, MerkleShape, WordShape};
pub use elgamal::{Ciphertext, EncryptionRandomness, KeyPair};
pub use error::{GadgetError, Result};
pub use merkle::{MerklePath, MerkleTree};
pub use note::Note;
pub use sha256::NativeDigest;
pub use utils::FieldElement;
