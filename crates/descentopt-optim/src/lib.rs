//! Descent optimization algorithms.
//!
//! This crate provides the three concrete optimizers built on
//! `descentopt-core`: plain gradient descent over a fixed trial-step set,
//! gradient descent with Armijo backtracking, and Polak-Ribiere-plus
//! conjugate gradient sharing the same backtracking line search. The three
//! are interchangeable behind the [`Optimizer`] trait, with uniform
//! parameter, logging, and termination semantics.
//!
//! # Available Optimizers
//!
//! - **GradientDescent**: tries the fixed step sizes {0.01, 0.05, 0.2} each
//!   iteration and keeps the best finite candidate
//! - **BacktrackingGradientDescent**: steps against the gradient with an
//!   Armijo backtracking line search
//! - **ConjugateGradient**: Polak-Ribiere-plus direction updates with the
//!   same line search
//!
//! # Examples
//!
//! ```rust
//! use descentopt_core::objective::QuadraticObjective;
//! use descentopt_core::optimizer::Optimizer;
//! use descentopt_core::params::OptimizerParameters;
//! use descentopt_core::types::Point;
//! use descentopt_optim::ConjugateGradient;
//!
//! let params = OptimizerParameters::new().with("max_steps", 1000usize);
//! let optimizer = ConjugateGradient::<QuadraticObjective>::with_parameters(params);
//!
//! let result = optimizer
//!     .optimize(&Point::from_vec(vec![10.0, 10.0]))
//!     .expect("quadratic bowl never fails");
//! assert!(result.value < 1e-6);
//! ```

pub mod conjugate_gradient;
pub mod gradient_descent;
pub mod gradient_descent_bt;

mod utils;

// Re-export the optimizers for convenience
pub use conjugate_gradient::{ConjugateGradient, ConjugateGradientConfig};
pub use gradient_descent::{GradientDescent, GradientDescentConfig};
pub use gradient_descent_bt::{BacktrackingGradientDescent, BacktrackingGradientDescentConfig};

// Re-export commonly used items from core
pub use descentopt_core::{
    error::{OptimizationError, Result},
    optimizer::{OptimizationResult, Optimizer, TerminationReason},
    params::OptimizerParameters,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        // The three optimizers are constructible from the re-exports.
        use descentopt_core::objective::QuadraticObjective;
        let _gd = GradientDescent::<QuadraticObjective>::new();
        let _bt = BacktrackingGradientDescent::<QuadraticObjective>::new();
        let _cg = ConjugateGradient::<QuadraticObjective>::new();
        let _config = GradientDescentConfig::<f64>::default();
    }
}
