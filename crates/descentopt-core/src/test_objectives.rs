//! Objectives used by the test suites.
//!
//! Available to downstream crates through the `test-utils` feature, mirroring
//! how the unit tests here use them.

use crate::error::Result;
use crate::numerics::norm_squared;
use crate::objective::{Objective, ObjectiveEvaluator};
use crate::types::{Point, Scalar};
use num_traits::Float;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An objective with the same value everywhere, hence a zero gradient.
///
/// Every algorithm must terminate on it within
/// `no_improvement_steps_to_terminate` iterations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantObjective<T: Scalar> {
    /// The value returned at every point
    pub value: T,
}

impl<T: Scalar> ConstantObjective<T> {
    /// Creates a constant objective with the given value.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Scalar> ObjectiveEvaluator<T> for ConstantObjective<T> {
    fn value(&self, _point: &Point<T>) -> T {
        self.value
    }

    fn gradient(&self, point: &Point<T>) -> Point<T> {
        Point::zeros(point.len())
    }
}

impl<T: Scalar> Objective<T> for ConstantObjective<T> {
    type Evaluator = Self;

    fn compile(&self, _dimension: usize) -> Result<Self> {
        Ok(*self)
    }
}

/// A quadratic bowl whose gradient is infinite in every component.
///
/// Drives plain gradient descent into its failure path: every trial step
/// lands at an infinite point and the objective value there is non-finite.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfiniteGradientObjective;

impl<T: Scalar> ObjectiveEvaluator<T> for InfiniteGradientObjective {
    fn value(&self, point: &Point<T>) -> T {
        norm_squared(point)
    }

    fn gradient(&self, point: &Point<T>) -> Point<T> {
        Point::from_element(point.len(), <T as Float>::infinity())
    }
}

impl<T: Scalar> Objective<T> for InfiniteGradientObjective {
    type Evaluator = Self;

    fn compile(&self, _dimension: usize) -> Result<Self> {
        Ok(*self)
    }
}

/// A sum-of-squares bowl that counts evaluator calls.
///
/// The counters are shared between the objective and its compiled evaluators,
/// so a test can hold the objective, run an optimizer against it, and read
/// the totals afterwards.
#[derive(Debug, Clone, Default)]
pub struct CountingObjective {
    value_evals: Arc<AtomicUsize>,
    gradient_evals: Arc<AtomicUsize>,
}

impl CountingObjective {
    /// Creates a counting objective with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of value evaluations performed so far.
    pub fn value_evaluations(&self) -> usize {
        self.value_evals.load(Ordering::Relaxed)
    }

    /// Number of gradient evaluations performed so far.
    pub fn gradient_evaluations(&self) -> usize {
        self.gradient_evals.load(Ordering::Relaxed)
    }
}

impl<T: Scalar> ObjectiveEvaluator<T> for CountingObjective {
    fn value(&self, point: &Point<T>) -> T {
        self.value_evals.fetch_add(1, Ordering::Relaxed);
        norm_squared(point)
    }

    fn gradient(&self, point: &Point<T>) -> Point<T> {
        self.gradient_evals.fetch_add(1, Ordering::Relaxed);
        point * <T as Scalar>::from_f64(2.0)
    }
}

impl<T: Scalar> Objective<T> for CountingObjective {
    type Evaluator = Self;

    fn compile(&self, _dimension: usize) -> Result<Self> {
        Ok(self.clone())
    }
}
