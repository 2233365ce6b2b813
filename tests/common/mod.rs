//! Common test utilities and shared infrastructure.
//!
//! This module provides all the shared functionality used across the test suite:
//! - `fixtures`: seeded randomness, allocation helpers and random paths
//! - `assertions`: satisfaction and shape assertions for whole circuits

pub mod assertions;
pub mod fixtures;

// Re-export commonly used test helpers
#[allow(unused_imports)] // These are used across many test files
pub use fixtures::{alloc_num, seeded_rng};
