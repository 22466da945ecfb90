//! Conjugate gradient with backtracking line search.
//!
//! The search direction blends the previous direction with the new gradient
//! through the nonnegative-clamped Polak-Ribiere coefficient (the PR+ restart
//! rule): `s <- max(PR(g_new, g_old), 0) * s - g_new`. Step lengths come from
//! the same [`BacktrackingLineSearch`] as backtracking gradient descent, with
//! identical parameters, which keeps the two algorithms comparable against
//! the same fixtures.
//!
//! Loop ordering is inherited from the reference behavior: the direction
//! update precedes the improvement test, and the gradient-norm early stop
//! (which here tests the *search direction*, not the raw gradient) sits at
//! the bottom of the loop.

use crate::utils::insufficient_improvement;
use descentopt_core::{
    error::Result,
    line_search::BacktrackingLineSearch,
    numerics::{flip_sign, norm_squared, polak_ribiere, scaled_sum},
    objective::{Objective, ObjectiveEvaluator},
    optimizer::{
        OptimizationResult, Optimizer, OptimizerBase, TerminationReason, ValueAndPoint,
    },
    params::OptimizerParameters,
    types::{Point, Scalar},
};
use log::{debug, info};
use num_traits::Float;

/// Configuration for the conjugate gradient optimizer.
///
/// The parameter set is identical to backtracking gradient descent's; field
/// names and defaults match the string parameter names one-for-one.
#[derive(Debug, Clone)]
pub struct ConjugateGradientConfig<T: Scalar> {
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
    /// Search-direction magnitude for early stopping (`grad_eps`)
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

impl<T: Scalar> Default for ConjugateGradientConfig<T> {
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

impl<T: Scalar> ConjugateGradientConfig<T> {
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

/// Polak-Ribiere-plus conjugate gradient optimizer.
///
/// # Example
///
/// ```rust
/// use descentopt_core::objective::QuadraticObjective;
/// use descentopt_core::optimizer::Optimizer;
/// use descentopt_core::types::Point;
/// use descentopt_optim::ConjugateGradient;
///
/// let optimizer = ConjugateGradient::<QuadraticObjective>::new();
/// let result = optimizer.optimize(&Point::from_vec(vec![10.0, 10.0])).unwrap();
/// assert!(result.point.norm() < 1e-3);
/// ```
#[derive(Debug)]
pub struct ConjugateGradient<'a, F> {
    base: OptimizerBase<'a, F>,
}

impl<'a, F> ConjugateGradient<'a, F> {
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

impl<F: Default> Default for ConjugateGradient<'_, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Optimizer<T> for ConjugateGradient<'_, F>
where
    T: Scalar,
    F: Objective<T>,
{
    fn name(&self) -> &str {
        "conjugate gradient"
    }

    fn optimize(&self, starting_point: &Point<T>) -> Result<OptimizationResult<T>> {
        let config = ConjugateGradientConfig::<T>::resolve(self.base.parameters());
        let evaluator = self.base.objective().compile(starting_point.len())?;
        let line_search =
            BacktrackingLineSearch::new(config.bt_alpha, config.bt_beta, config.bt_max_steps);

        info!("{}: begin at {:?}", self.name(), starting_point.as_slice());
        let mut current =
            ValueAndPoint::new(evaluator.value(starting_point), starting_point.clone());

        let mut current_gradient = evaluator.gradient(&current.point);
        // Direction to search for a minimum; the first step goes against the
        // gradient.
        let mut s = current_gradient.clone();
        flip_sign(&mut s);

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
            let next = line_search.search(&evaluator, &current.point, &s);
            let new_gradient = evaluator.gradient(&next.point);
            iterations = iteration + 1;

            // Direction for the next step (PR+ restart rule).
            let omega = <T as Float>::max(
                polak_ribiere(&new_gradient, &current_gradient),
                T::zero(),
            );
            s = scaled_sum(&s, &new_gradient, omega, -T::one());

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
            current_gradient = new_gradient;

            // Simple early stopping by the norm of the search direction.
            if <T as Float>::sqrt(norm_squared(&s)) < config.grad_eps
                && iteration >= config.min_steps
            {
                info!("{}: terminating due to small direction norm", self.name());
                reason = TerminationReason::SmallGradient;
                break;
            }
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
    fn test_config_matches_backtracking_descent() {
        use crate::gradient_descent_bt::BacktrackingGradientDescentConfig;

        let cg = ConjugateGradientConfig::<f64>::default();
        let bt = BacktrackingGradientDescentConfig::<f64>::default();
        assert_eq!(cg.min_steps, bt.min_steps);
        assert_eq!(cg.max_steps, bt.max_steps);
        assert_eq!(cg.bt_alpha, bt.bt_alpha);
        assert_eq!(cg.bt_beta, bt.bt_beta);
        assert_eq!(cg.bt_max_steps, bt.bt_max_steps);
        assert_eq!(cg.grad_eps, bt.grad_eps);
    }

    #[test]
    fn test_converges_on_quadratic_bowl() {
        let optimizer = ConjugateGradient::<QuadraticObjective>::new();
        let result = optimizer
            .optimize(&Point::from_vec(vec![10.0, 10.0]))
            .unwrap();
        assert!(result.point.norm() < 1e-3);
        assert!(result.value < 1e-6);
        assert!(result.iterations <= 5000);
    }

    #[test]
    fn test_direction_norm_early_stop_with_overrides() {
        let optimizer = ConjugateGradient::<QuadraticObjective>::with_parameters(
            OptimizerParameters::new()
                .with("min_steps", 0usize)
                .with("grad_eps", 1e10),
        );
        let result = optimizer
            .optimize(&Point::from_vec(vec![10.0, 10.0]))
            .unwrap();
        assert_eq!(result.termination_reason, TerminationReason::SmallGradient);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_constant_objective_terminates_quickly() {
        let optimizer = ConjugateGradient::<ConstantObjective<f64>>::from_owned(
            ConstantObjective::new(1.0),
        );
        let result = optimizer
            .optimize(&Point::from_vec(vec![2.0, 2.0]))
            .unwrap();
        assert_eq!(result.termination_reason, TerminationReason::NoImprovement);
        assert!(result.iterations <= 2);
        assert_eq!(result.value, 1.0);
    }

    #[test]
    fn test_parameter_snapshot_is_visible() {
        let params = OptimizerParameters::new().with("bt_beta", 0.5);
        let optimizer = ConjugateGradient::<QuadraticObjective>::with_parameters(params);
        let snapshot = optimizer.parameters().expect("snapshot stored");
        assert_eq!(snapshot.get("bt_beta", 0.8), 0.5);
    }
}
