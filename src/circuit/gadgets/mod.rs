//! Branch-free circuit gadgets.
//!
//! This module contains the low-level components every circuit is assembled from.
//! Gadgets take the caller's constraint system by namespace, allocate their outputs
//! and return them; none of them keeps state between calls.

pub mod arith;
pub mod bits;
pub mod commitment;
pub mod compare;
pub mod elgamal;
pub mod equality;
pub mod merkle;
pub mod modexp;
pub mod select;
pub mod sha256;

// Re-export commonly used gadgets
pub use arith::{alloc_constant, divide};
pub use bits::{exponent_bits, to_bits_le_fixed};
pub use commitment::NoteVar;
pub use elgamal::CiphertextVar;
pub use equality::{check_digest, digest_mismatch_count, enforce_digest_equal, CheckMode};
pub use merkle::{auth_path, direction_bits_from_selector, verify_auth_path};
pub use modexp::{mod_exp, mod_exp_with_bits};
pub use select::{select, select_or_constant};
pub use sha256::{sha256_words, DigestVar};
