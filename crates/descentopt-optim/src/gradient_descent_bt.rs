//! Gradient descent with Armijo backtracking line search.
//!
//! Each iteration steps against the gradient, with the step length chosen by
//! the shared [`BacktrackingLineSearch`]. Early stopping compares the rooted
//! gradient norm against `grad_eps` once at least `min_steps` iterations have
//! run; the check happens *before* stepping, so a run that starts at a
//! stationary point (with `min_steps = 0`) returns the starting point
//! untouched.

use crate::utils::insufficient_improvement;
use descentopt_core::{
    error::Result,
    line_search::BacktrackingLineSearch,
    numerics::{flip_sign, norm_squared},
    objective::{Objective, ObjectiveEvaluator},
    optimizer::{
        OptimizationResult, Optimizer, OptimizerBase, TerminationReason, ValueAndPoint,
    },
    params::OptimizerParameters,
    types::{Point, Scalar},
};
use log::{debug, info};
use num_traits::Float;

/// Configuration for backtracking gradient descent.
///
/// Field names and defaults match the string parameter names one-for-one;
/// see [`from_parameters`](Self::from_parameters).
#[derive(Debug, Clone)]
pub struct BacktrackingGradientDescentConfig<T: Scalar> {
    /// Minimum number of optimization steps, ignoring early stopping
    /// (`min_steps`)
    pub min_steps: usize,
    /// Maximum number of optimization steps (`max_steps`)
    pub max_steps: usize,
    /// Armijo sufficient-decrease parameter (`bt_alpha`)
    pub bt_alpha: T,
    /// Backtracking shrink factor (`bt_beta`)
    pub bt_beta: T,
    /// Maximum number of backtracking shrink steps (`bt_max_steps`)
    pub bt_max_steps: usize,
    /// Gradient magnitude for early stopping (`grad_eps`)
    pub grad_eps: T,
    /// Terminate early if the absolute improvement is less than this
    /// (`min_absolute_per_step_improvement`)
    pub min_absolute_per_step_improvement: T,
    /// Terminate early if the relative improvement is less than this
    /// (`min_relative_per_step_improvement`)
    pub min_relative_per_step_improvement: T,
    /// Consecutive no-improvement iterations before terminating
    /// (`no_improvement_steps_to_terminate`)
    pub no_improvement_steps_to_terminate: usize,
}

impl<T: Scalar> Default for BacktrackingGradientDescentConfig<T> {
    fn default() -> Self {
        Self {
            min_steps: 3,
            max_steps: 5000,
            bt_alpha: <T as Scalar>::from_f64(0.5),
            bt_beta: <T as Scalar>::from_f64(0.8),
            bt_max_steps: 100,
            grad_eps: <T as Scalar>::from_f64(1e-8),
            min_absolute_per_step_improvement: <T as Scalar>::from_f64(1e-25),
            min_relative_per_step_improvement: <T as Scalar>::from_f64(1e-25),
            no_improvement_steps_to_terminate: 2,
        }
    }
}

impl<T: Scalar> BacktrackingGradientDescentConfig<T> {
    /// Translates the string-keyed override map into the typed record.
    ///
    /// Unknown names in `params` are ignored; unset names keep the defaults.
    pub fn from_parameters(params: &OptimizerParameters) -> Self {
        let defaults = Self::default();
        Self {
            min_steps: params.get("min_steps", defaults.min_steps),
            max_steps: params.get("max_steps", defaults.max_steps),
            bt_alpha: <T as Scalar>::from_f64(params.get("bt_alpha", Scalar::to_f64(defaults.bt_alpha))),
            bt_beta: <T as Scalar>::from_f64(params.get("bt_beta", Scalar::to_f64(defaults.bt_beta))),
            bt_max_steps: params.get("bt_max_steps", defaults.bt_max_steps),
            grad_eps: <T as Scalar>::from_f64(params.get("grad_eps", Scalar::to_f64(defaults.grad_eps))),
            min_absolute_per_step_improvement: <T as Scalar>::from_f64(params.get(
                "min_absolute_per_step_improvement",
                Scalar::to_f64(defaults.min_absolute_per_step_improvement),
            )),
            min_relative_per_step_improvement: <T as Scalar>::from_f64(params.get(
                "min_relative_per_step_improvement",
                Scalar::to_f64(defaults.min_relative_per_step_improvement),
            )),
            no_improvement_steps_to_terminate: params.get(
                "no_improvement_steps_to_terminate",
                defaults.no_improvement_steps_to_terminate,
            ),
        }
    }

    fn resolve(params: Option<&OptimizerParameters>) -> Self {
        match params {
            Some(p) => Self::from_parameters(p),
            None => Self::default(),
        }
    }
}

/// Gradient descent with backtracking line search.
///
/// # Example
///
/// ```rust
/// use descentopt_core::objective::QuadraticObjective;
/// use descentopt_core::optimizer::Optimizer;
/// use descentopt_core::types::Point;
/// use descentopt_optim::BacktrackingGradientDescent;
///
/// let optimizer = BacktrackingGradientDescent::<QuadraticObjective>::new();
/// let result = optimizer.optimize(&Point::from_vec(vec![10.0, 10.0])).unwrap();
/// assert!(result.point.norm() < 1e-3);
/// ```
#[derive(Debug)]
pub struct BacktrackingGradientDescent<'a, F> {
    base: OptimizerBase<'a, F>,
}

impl<'a, F> BacktrackingGradientDescent<'a, F> {
    /// Allocates a default-constructed objective owned by the optimizer.
    pub fn new() -> Self
    where
        F: Default,
    {
        Self {
            base: OptimizerBase::new(),
        }
    }

    /// Like [`new`](Self::new), with a parameter snapshot.
    pub fn with_parameters(parameters: OptimizerParameters) -> Self
    where
        F: Default,
    {
        Self {
            base: OptimizerBase::with_parameters(parameters),
        }
    }

    /// Borrows an existing objective; ownership remains with the caller.
    pub fn from_objective(objective: &'a F) -> Self {
        Self {
            base: OptimizerBase::from_objective(objective),
        }
    }

    /// Like [`from_objective`](Self::from_objective), with a parameter
    /// snapshot.
    pub fn from_objective_with_parameters(
        objective: &'a F,
        parameters: OptimizerParameters,
    ) -> Self {
        Self {
            base: OptimizerBase::from_objective_with_parameters(objective, parameters),
        }
    }

    /// Takes ownership of a caller-built objective instance.
    pub fn from_owned(objective: F) -> Self {
        Self {
            base: OptimizerBase::from_owned(objective),
        }
    }

    /// Like [`from_owned`](Self::from_owned), with a parameter snapshot.
    pub fn from_owned_with_parameters(objective: F, parameters: OptimizerParameters) -> Self {
        Self {
            base: OptimizerBase::from_owned_with_parameters(objective, parameters),
        }
    }

    /// Shared access to the underlying objective.
    pub fn objective(&self) -> &F {
        self.base.objective()
    }

    /// Exclusive access to the underlying objective; `None` when borrowed.
    pub fn objective_mut(&mut self) -> Option<&mut F> {
        self.base.objective_mut()
    }

    /// The parameter snapshot, if one was supplied at construction.
    pub fn parameters(&self) -> Option<&OptimizerParameters> {
        self.base.parameters()
    }
}

impl<F: Default> Default for BacktrackingGradientDescent<'_, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Optimizer<T> for BacktrackingGradientDescent<'_, F>
where
    T: Scalar,
    F: Objective<T>,
{
    fn name(&self) -> &str {
        "backtracking gradient descent"
    }

    fn optimize(&self, starting_point: &Point<T>) -> Result<OptimizationResult<T>> {
        let config = BacktrackingGradientDescentConfig::<T>::resolve(self.base.parameters());
        let evaluator = self.base.objective().compile(starting_point.len())?;
        let line_search =
            BacktrackingLineSearch::new(config.bt_alpha, config.bt_beta, config.bt_max_steps);

        info!("{}: begin at {:?}", self.name(), starting_point.as_slice());
        let mut current =
            ValueAndPoint::new(evaluator.value(starting_point), starting_point.clone());

        let mut no_improvement_steps = 0usize;
        let mut iterations = 0usize;
        let mut reason = TerminationReason::MaxSteps;

        for iteration in 0..config.max_steps {
            debug!(
                "{}: iteration {}, f = {} at {:?}",
                self.name(),
                iteration + 1,
                current.value,
                current.point.as_slice()
            );
            let mut direction = evaluator.gradient(&current.point);

            // Simple early stopping by the norm of the gradient.
            if <T as Float>::sqrt(norm_squared(&direction)) < config.grad_eps
                && iteration >= config.min_steps
            {
                info!("{}: terminating due to small gradient norm", self.name());
                reason = TerminationReason::SmallGradient;
                break;
            }

            // Going against the gradient to minimize the function.
            flip_sign(&mut direction);
            let next = line_search.search(&evaluator, &current.point, &direction);
            iterations = iteration + 1;

            if insufficient_improvement(
                next.value,
                current.value,
                config.min_relative_per_step_improvement,
                config.min_absolute_per_step_improvement,
            ) {
                no_improvement_steps += 1;
                if no_improvement_steps >= config.no_improvement_steps_to_terminate {
                    info!("{}: terminating due to no improvement", self.name());
                    reason = TerminationReason::NoImprovement;
                    break;
                }
            } else {
                no_improvement_steps = 0;
            }

            current = next;
        }

        info!("{}: result = {:?}", self.name(), current.point.as_slice());
        info!("{}: objective value = {}", self.name(), current.value);

        Ok(OptimizationResult::new(current, iterations, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use descentopt_core::objective::QuadraticObjective;
    use descentopt_core::test_objectives::ConstantObjective;

    #[test]
    fn test_config_defaults() {
        let config = BacktrackingGradientDescentConfig::<f64>::default();
        assert_eq!(config.min_steps, 3);
        assert_eq!(config.max_steps, 5000);
        assert_eq!(config.bt_alpha, 0.5);
        assert_eq!(config.bt_beta, 0.8);
        assert_eq!(config.bt_max_steps, 100);
        assert_eq!(config.grad_eps, 1e-8);
        assert_eq!(config.no_improvement_steps_to_terminate, 2);
    }

    #[test]
    fn test_converges_on_quadratic_bowl() {
        let optimizer = BacktrackingGradientDescent::<QuadraticObjective>::new();
        let result = optimizer
            .optimize(&Point::from_vec(vec![10.0, 10.0]))
            .unwrap();
        assert!(result.point.norm() < 1e-3);
        assert!(result.value < 1e-6);
        assert!(result.iterations <= 5000);
    }

    #[test]
    fn test_gradient_norm_early_stop_with_overrides() {
        // min_steps = 0 plus a huge grad_eps forces the gradient-norm path on
        // the very first iteration, before any step is taken.
        let optimizer = BacktrackingGradientDescent::<QuadraticObjective>::with_parameters(
            OptimizerParameters::new()
                .with("min_steps", 0usize)
                .with("grad_eps", 1e10),
        );
        let start = Point::from_vec(vec![10.0, 10.0]);
        let result = optimizer.optimize(&start).unwrap();
        assert_eq!(result.termination_reason, TerminationReason::SmallGradient);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.point, start);
        assert_eq!(result.value, 200.0);
    }

    #[test]
    fn test_min_steps_holds_off_early_stop() {
        // At the origin the gradient is exactly zero, but min_steps keeps the
        // default configuration from stopping via the gradient-norm path
        // until the no-improvement counter fires first.
        let optimizer = BacktrackingGradientDescent::<QuadraticObjective>::new();
        let result = optimizer.optimize(&Point::from_vec(vec![0.0, 0.0])).unwrap();
        assert_eq!(result.termination_reason, TerminationReason::NoImprovement);
        assert!(result.iterations <= 2);
    }

    #[test]
    fn test_constant_objective_terminates_quickly() {
        let optimizer = BacktrackingGradientDescent::<ConstantObjective<f64>>::new();
        let result = optimizer
            .optimize(&Point::from_vec(vec![4.0, -1.0]))
            .unwrap();
        assert_eq!(result.termination_reason, TerminationReason::NoImprovement);
        assert!(result.iterations <= 2);
    }
}
