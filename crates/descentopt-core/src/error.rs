//! Error types for optimization runs.
//!
//! This module defines the error surface of the library. The only fatal
//! algorithmic condition is [`OptimizationError::NoValidCandidate`], raised by
//! plain gradient descent when every trial step produces a non-finite
//! objective value. Backtracking-based algorithms never raise it; they accept
//! the last-tried point when their halving budget runs out.

use thiserror::Error;

/// Errors that can occur during an optimization run.
#[derive(Debug, Clone, Error)]
pub enum OptimizationError {
    /// No trial step produced a finite objective value.
    ///
    /// Raised by plain gradient descent when all of its fixed trial steps
    /// yield NaN or infinite objective values in one iteration.
    #[error(
        "no valid candidate found at iteration {iteration}: \
         every trial step produced a non-finite objective value"
    )]
    NoValidCandidate {
        /// Zero-based iteration at which candidate selection failed
        iteration: usize,
    },

    /// The differentiation engine failed to compile the objective.
    #[error("objective compilation failed: {reason}")]
    Compilation {
        /// Description of the compilation failure
        reason: String,
    },

    /// Dimension mismatch between a point and the compiled evaluators.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the evaluators were compiled for
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },
}

impl OptimizationError {
    /// Creates a NoValidCandidate error for the given iteration.
    pub fn no_valid_candidate(iteration: usize) -> Self {
        Self::NoValidCandidate { iteration }
    }

    /// Creates a Compilation error with a custom reason.
    pub fn compilation<S: Into<String>>(reason: S) -> Self {
        Self::Compilation {
            reason: reason.into(),
        }
    }

    /// Creates a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}

/// Result type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizationError>;
