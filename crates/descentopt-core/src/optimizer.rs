//! Optimizer trait, result types, and objective ownership.
//!
//! Every optimizer owns or references exactly one objective instance for its
//! entire lifetime; the storage mode is fixed at construction through
//! [`ObjectiveHandle`]. An optional [`OptimizerParameters`] snapshot is taken
//! at construction and read-only afterwards. The abstract operation is
//! [`Optimizer::optimize`]: run one full minimization from a starting point
//! on the caller's thread, blocking until termination.

use crate::error::Result;
use crate::params::OptimizerParameters;
use crate::types::{Point, Scalar};

/// A candidate point paired with its objective value.
///
/// Ordering is defined by `value`, ascending: smaller is better for
/// minimization. Candidate selection within one iteration is a stable minimum
/// over the candidates in trial order, so ties keep the earlier candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAndPoint<T: Scalar> {
    /// Objective value at `point`
    pub value: T,
    /// The candidate parameter vector
    pub point: Point<T>,
}

impl<T: Scalar> ValueAndPoint<T> {
    /// Creates a candidate from a value and a point.
    pub fn new(value: T, point: Point<T>) -> Self {
        Self { value, point }
    }

    /// True if this candidate strictly improves on `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.value < other.value
    }
}

/// Reason an optimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The configured number of consecutive insufficient-improvement
    /// iterations was reached.
    NoImprovement,
    /// The gradient (or search-direction) norm fell below `grad_eps` after at
    /// least `min_steps` iterations.
    SmallGradient,
    /// The unconditional `max_steps` iteration ceiling was reached.
    MaxSteps,
}

/// The outcome of one optimization run; immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult<T: Scalar> {
    /// Objective value at the final point
    pub value: T,
    /// The final point adopted by the optimizer
    pub point: Point<T>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Why the run stopped
    pub termination_reason: TerminationReason,
}

impl<T: Scalar> OptimizationResult<T> {
    /// Creates a result from the final adopted candidate.
    pub fn new(current: ValueAndPoint<T>, iterations: usize, reason: TerminationReason) -> Self {
        Self {
            value: current.value,
            point: current.point,
            iterations,
            termination_reason: reason,
        }
    }
}

/// The capability "run one optimization given a starting point".
///
/// There are exactly three implementations: plain gradient descent, gradient
/// descent with backtracking, and conjugate gradient with backtracking (all
/// in `descentopt-optim`). The set is closed by design; nothing in the
/// observed behavior requires an open extension point.
pub trait Optimizer<T: Scalar> {
    /// Human-readable algorithm name, used in log lines.
    fn name(&self) -> &str;

    /// Runs the optimization from `starting_point` to termination.
    ///
    /// Synchronous and single-threaded: blocks the caller's thread until a
    /// termination criterion fires. The dimension of `starting_point` fixes
    /// the dimensionality of the whole run.
    fn optimize(&self, starting_point: &Point<T>) -> Result<OptimizationResult<T>>;
}

/// Storage mode for the objective instance, fixed at construction.
#[derive(Debug)]
pub enum ObjectiveHandle<'a, F> {
    /// The optimizer allocated and owns the instance.
    Owned(F),
    /// The caller retains ownership; the optimizer must not outlive the
    /// reference.
    Borrowed(&'a F),
}

impl<F> ObjectiveHandle<'_, F> {
    /// Shared access to the objective, whichever side owns it.
    pub fn get(&self) -> &F {
        match self {
            Self::Owned(f) => f,
            Self::Borrowed(f) => f,
        }
    }

    /// Exclusive access to the objective.
    ///
    /// Returns `None` for borrowed storage: a shared reference cannot yield
    /// exclusive access, so callers that need to mutate the objective must
    /// use an owned construction mode.
    pub fn get_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Owned(f) => Some(f),
            Self::Borrowed(_) => None,
        }
    }
}

/// Objective handle plus parameter snapshot, embedded by every optimizer.
///
/// The five construction modes map onto constructors as follows:
///
/// 1. no arguments — [`new`](Self::new) (requires `F: Default`)
/// 2. parameters only — [`with_parameters`](Self::with_parameters)
/// 3. existing instance by reference — [`from_objective`](Self::from_objective)
/// 4. parameters plus reference —
///    [`from_objective_with_parameters`](Self::from_objective_with_parameters)
/// 5. a caller-built instance handed over by value —
///    [`from_owned`](Self::from_owned) /
///    [`from_owned_with_parameters`](Self::from_owned_with_parameters)
#[derive(Debug)]
pub struct OptimizerBase<'a, F> {
    objective: ObjectiveHandle<'a, F>,
    parameters: Option<OptimizerParameters>,
}

impl<'a, F> OptimizerBase<'a, F> {
    /// Allocates a default-constructed objective owned by the optimizer.
    pub fn new() -> Self
    where
        F: Default,
    {
        Self {
            objective: ObjectiveHandle::Owned(F::default()),
            parameters: None,
        }
    }

    /// Like [`new`](Self::new), with a parameter snapshot.
    pub fn with_parameters(parameters: OptimizerParameters) -> Self
    where
        F: Default,
    {
        Self {
            objective: ObjectiveHandle::Owned(F::default()),
            parameters: Some(parameters),
        }
    }

    /// Borrows an existing objective; ownership remains with the caller.
    pub fn from_objective(objective: &'a F) -> Self {
        Self {
            objective: ObjectiveHandle::Borrowed(objective),
            parameters: None,
        }
    }

    /// Like [`from_objective`](Self::from_objective), with a parameter
    /// snapshot.
    pub fn from_objective_with_parameters(
        objective: &'a F,
        parameters: OptimizerParameters,
    ) -> Self {
        Self {
            objective: ObjectiveHandle::Borrowed(objective),
            parameters: Some(parameters),
        }
    }

    /// Takes ownership of a caller-built objective instance.
    pub fn from_owned(objective: F) -> Self {
        Self {
            objective: ObjectiveHandle::Owned(objective),
            parameters: None,
        }
    }

    /// Like [`from_owned`](Self::from_owned), with a parameter snapshot.
    pub fn from_owned_with_parameters(objective: F, parameters: OptimizerParameters) -> Self {
        Self {
            objective: ObjectiveHandle::Owned(objective),
            parameters: Some(parameters),
        }
    }

    /// Shared access to the underlying objective.
    pub fn objective(&self) -> &F {
        self.objective.get()
    }

    /// Exclusive access to the underlying objective; `None` when borrowed.
    pub fn objective_mut(&mut self) -> Option<&mut F> {
        self.objective.get_mut()
    }

    /// The parameter snapshot, if one was supplied at construction.
    pub fn parameters(&self) -> Option<&OptimizerParameters> {
        self.parameters.as_ref()
    }
}

impl<F: Default> Default for OptimizerBase<'_, F> {
    fn default() -> Self {
        Self::new()
    }
}
