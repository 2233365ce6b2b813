//! Error types for the shielded gadgets library

use bellpepper_core::SynthesisError;

/// Error types for gadget construction and the native reference layer
#[derive(Debug, thiserror::Error)]
pub enum GadgetError {
    /// An input slice does not have the length its shape parameter demands
    #[error("Shape mismatch: {what} expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A shape parameter is outside the range a gadget supports
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// The constraint system rejected an allocation or a witness computation
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Invalid input parameters (generic fallback)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GadgetError {
    /// Builds a [`GadgetError::ShapeMismatch`] unless `got == expected`.
    pub fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
        if expected == got {
            Ok(())
        } else {
            Err(GadgetError::ShapeMismatch {
                what,
                expected,
                got,
            })
        }
    }
}

impl From<GadgetError> for SynthesisError {
    fn from(err: GadgetError) -> Self {
        match err {
            GadgetError::Synthesis(inner) => inner,
            other => {
                tracing::error!("circuit construction aborted: {}", other);
                SynthesisError::Unsatisfiable
            }
        }
    }
}

/// Convenience Result type for gadget operations
pub type Result<T> = std::result::Result<T, GadgetError>;
