//! Core traits and types for unconstrained descent optimization.
//!
//! This crate provides the foundation shared by the concrete optimizers in
//! `descentopt-optim`: the scalar abstraction, the objective-evaluation
//! contract, the backtracking line search, the parameter override store, and
//! the optimizer base abstraction (result types, objective ownership).
//!
//! # Key Concepts
//!
//! - **Objective**: a differentiable scalar function of a real vector,
//!   compiled once per run into a value evaluator and a gradient evaluator
//! - **Point**: a concrete parameter vector at which the evaluators are called
//! - **Line search**: step-halving until the Armijo sufficient-decrease
//!   condition holds
//!
//! # Modules
//!
//! - [`error`]: Error types for optimization runs
//! - [`line_search`]: Backtracking line search
//! - [`numerics`]: Vector primitives shared by the optimizers
//! - [`objective`]: Objective-evaluation contract
//! - [`optimizer`]: Optimizer trait, result types, objective ownership
//! - [`params`]: Named numeric parameter overrides
//! - [`types`]: Scalar abstraction and type aliases

pub mod error;
pub mod line_search;
pub mod numerics;
pub mod objective;
pub mod optimizer;
pub mod params;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_objectives;

// Re-export commonly used items at the crate root
pub use error::{OptimizationError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use descentopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{OptimizationError, Result};
    pub use crate::line_search::BacktrackingLineSearch;
    pub use crate::numerics::{flip_sign, is_normal, norm_squared, polak_ribiere, scaled_sum};
    pub use crate::objective::{FnObjective, Objective, ObjectiveEvaluator, QuadraticObjective};
    pub use crate::optimizer::{
        ObjectiveHandle, OptimizationResult, Optimizer, OptimizerBase, TerminationReason,
        ValueAndPoint,
    };
    pub use crate::params::{OptimizerParameters, ParameterValue};
    pub use crate::types::{Point, Scalar};
}
