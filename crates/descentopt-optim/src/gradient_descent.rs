//! Plain gradient descent over a fixed trial-step set.
//!
//! Each iteration evaluates the gradient once and tries the step sizes
//! {0.01, 0.05, 0.2} in order, keeping the best candidate whose objective
//! value is finite (stable minimum: ties keep the earlier candidate). The
//! position update happens every iteration that produced a valid candidate;
//! the improvement test only drives the no-improvement termination counter.
//!
//! This is the one algorithm with a hard failure mode: if *no* trial step
//! produces a finite value in some iteration, the run fails with
//! [`OptimizationError::NoValidCandidate`]. The backtracking-based
//! algorithms never fail this way; they accept the last-tried point instead.
//! The asymmetry is inherited behavior and preserved on purpose.

use crate::utils::insufficient_improvement;
use descentopt_core::{
    error::{OptimizationError, Result},
    numerics::{is_normal, scaled_sum},
    objective::{Objective, ObjectiveEvaluator},
    optimizer::{
        OptimizationResult, Optimizer, OptimizerBase, TerminationReason, ValueAndPoint,
    },
    params::OptimizerParameters,
    types::{Point, Scalar},
};
use log::{debug, info};

/// The fixed, ordered trial step sizes tried each iteration.
const TRIAL_STEPS: [f64; 3] = [0.01, 0.05, 0.2];

/// Configuration for plain gradient descent.
///
/// This is the typed record behind the string-keyed parameter names of
/// [`from_parameters`](Self::from_parameters); field names and defaults match
/// the parameter names one-for-one.
#[derive(Debug, Clone)]
pub struct GradientDescentConfig<T: Scalar> {
    /// Maximum number of optimization steps (`max_steps`)
    pub max_steps: usize,
    /// Gradient scale factor (`step_factor`); declared for compatibility but
    /// not applied to the fixed trial-step set
    pub step_factor: T,
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

impl<T: Scalar> Default for GradientDescentConfig<T> {
    fn default() -> Self {
        Self {
            max_steps: 5000,
            step_factor: T::one(),
            min_absolute_per_step_improvement: <T as Scalar>::from_f64(1e-25),
            min_relative_per_step_improvement: <T as Scalar>::from_f64(1e-25),
            no_improvement_steps_to_terminate: 2,
        }
    }
}

impl<T: Scalar> GradientDescentConfig<T> {
    /// Translates the string-keyed override map into the typed record.
    ///
    /// Unknown names in `params` are ignored; unset names keep the defaults.
    pub fn from_parameters(params: &OptimizerParameters) -> Self {
        let defaults = Self::default();
        Self {
            max_steps: params.get("max_steps", defaults.max_steps),
            step_factor: <T as Scalar>::from_f64(
                params.get("step_factor", Scalar::to_f64(defaults.step_factor)),
            ),
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

/// Naive gradient descent that tries three different step sizes per
/// iteration.
///
/// # Example
///
/// ```rust
/// use descentopt_core::objective::QuadraticObjective;
/// use descentopt_core::optimizer::Optimizer;
/// use descentopt_core::types::Point;
/// use descentopt_optim::GradientDescent;
///
/// let optimizer = GradientDescent::<QuadraticObjective>::new();
/// let result = optimizer.optimize(&Point::from_vec(vec![10.0, 10.0])).unwrap();
/// assert!(result.point.norm() < 1e-3);
/// ```
#[derive(Debug)]
pub struct GradientDescent<'a, F> {
    base: OptimizerBase<'a, F>,
}

impl<'a, F> GradientDescent<'a, F> {
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

impl<F: Default> Default for GradientDescent<'_, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Optimizer<T> for GradientDescent<'_, F>
where
    T: Scalar,
    F: Objective<T>,
{
    fn name(&self) -> &str {
        "gradient descent"
    }

    fn optimize(&self, starting_point: &Point<T>) -> Result<OptimizationResult<T>> {
        let config = GradientDescentConfig::<T>::resolve(self.base.parameters());
        let evaluator = self.base.objective().compile(starting_point.len())?;

        info!("{}: begin at {:?}", self.name(), starting_point.as_slice());
        let starting_value = evaluator.value(starting_point);
        debug!(
            "{}: original objective value = {}",
            self.name(),
            starting_value
        );

        let mut current = ValueAndPoint::new(starting_value, starting_point.clone());
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
            let gradient = evaluator.gradient(&current.point);

            let mut best_candidate = current.clone();
            let mut has_valid_candidate = false;
            for step in TRIAL_STEPS {
                let candidate_point =
                    scaled_sum(&current.point, &gradient, T::one(), -<T as Scalar>::from_f64(step));
                let value = evaluator.value(&candidate_point);
                if is_normal(value) {
                    has_valid_candidate = true;
                    debug!("{}: value {} at trial step {}", self.name(), value, step);
                    let candidate = ValueAndPoint::new(value, candidate_point);
                    if candidate.is_better_than(&best_candidate) {
                        best_candidate = candidate;
                    }
                }
            }
            if !has_valid_candidate {
                return Err(OptimizationError::no_valid_candidate(iteration));
            }
            iterations = iteration + 1;

            if insufficient_improvement(
                best_candidate.value,
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
            current = best_candidate;
        }

        info!("{}: result = {:?}", self.name(), current.point.as_slice());
        info!("{}: objective value = {}", self.name(), current.value);

        Ok(OptimizationResult::new(current, iterations, reason))
    }
}
