//! Objective-evaluation contract consumed by the optimizers.
//!
//! An optimizer never differentiates anything itself. It hands the objective
//! to the differentiation engine once per run, with the run's dimensionality,
//! and receives back a pair of compiled evaluators: a scalar evaluator mapping
//! a point to a finite-or-not value, and a gradient evaluator mapping a point
//! to a vector of the same dimensionality. Both are stateless pure functions
//! of their input point once compiled, so evaluation is deterministic and
//! repeatable and may happen in any order.
//!
//! How the engine builds the evaluators (taping, symbolic compilation, JIT) is
//! outside this crate; [`Objective::compile`] is the whole contract. For
//! objectives with hand-written gradients, [`FnObjective`] skips the engine
//! entirely.

use crate::error::Result;
use crate::numerics::norm_squared;
use crate::types::{Point, Scalar};

/// Compiled evaluators for one objective at one dimensionality.
///
/// Implementations must be pure: two calls with the same point return the
/// same result, and no side effects are observable to the optimizer. If an
/// engine caches compiled state internally, that cache must be immutable
/// after compilation or internally synchronized.
pub trait ObjectiveEvaluator<T: Scalar> {
    /// Evaluates the objective at `point`.
    ///
    /// The result may be NaN or infinite; the optimizers treat non-finite
    /// values as invalid candidates rather than errors.
    fn value(&self, point: &Point<T>) -> T;

    /// Evaluates the gradient at `point`.
    ///
    /// The returned vector has the dimensionality the evaluator was compiled
    /// for.
    fn gradient(&self, point: &Point<T>) -> Point<T>;
}

/// A differentiable objective that can be compiled for a given dimension.
///
/// This is the seam between the optimizers and the differentiation engine:
/// the engine-specific objective type builds its symbolic expression over a
/// parameter vector of `dimension` entries and returns the compiled evaluator
/// pair. Compilation happens exactly once per `optimize` call.
pub trait Objective<T: Scalar> {
    /// The compiled evaluator pair produced for this objective.
    type Evaluator: ObjectiveEvaluator<T>;

    /// Compiles the objective and its gradient for `dimension`-dimensional
    /// points.
    fn compile(&self, dimension: usize) -> Result<Self::Evaluator>;
}

/// The sum-of-squares bowl `f(x) = Σ xᵢ²`, with its unique minimum at the
/// origin.
///
/// This is the library's reference objective: cheap, convex, and with the
/// exact gradient `2x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticObjective;

/// Compiled evaluators for [`QuadraticObjective`].
#[derive(Debug, Clone, Copy)]
pub struct QuadraticEvaluator;

impl<T: Scalar> ObjectiveEvaluator<T> for QuadraticEvaluator {
    fn value(&self, point: &Point<T>) -> T {
        norm_squared(point)
    }

    fn gradient(&self, point: &Point<T>) -> Point<T> {
        point * <T as Scalar>::from_f64(2.0)
    }
}

impl<T: Scalar> Objective<T> for QuadraticObjective {
    type Evaluator = QuadraticEvaluator;

    fn compile(&self, _dimension: usize) -> Result<QuadraticEvaluator> {
        Ok(QuadraticEvaluator)
    }
}

/// A closure-backed objective for callers that supply the gradient by hand.
///
/// # Example
///
/// ```
/// use descentopt_core::objective::{FnObjective, Objective, ObjectiveEvaluator};
/// use descentopt_core::types::Point;
///
/// // f(x) = (x0 - 1)^2 with gradient 2 * (x0 - 1)
/// let objective = FnObjective::new(
///     |x: &Point<f64>| (x[0] - 1.0) * (x[0] - 1.0),
///     |x: &Point<f64>| Point::from_vec(vec![2.0 * (x[0] - 1.0)]),
/// );
/// let evaluator = objective.compile(1).unwrap();
/// assert_eq!(evaluator.value(&Point::from_vec(vec![3.0])), 4.0);
/// ```
#[derive(Clone)]
pub struct FnObjective<V, G> {
    value_fn: V,
    gradient_fn: G,
}

impl<V, G> FnObjective<V, G> {
    /// Creates an objective from a value closure and a gradient closure.
    pub fn new(value_fn: V, gradient_fn: G) -> Self {
        Self {
            value_fn,
            gradient_fn,
        }
    }
}

impl<T, V, G> ObjectiveEvaluator<T> for FnObjective<V, G>
where
    T: Scalar,
    V: Fn(&Point<T>) -> T,
    G: Fn(&Point<T>) -> Point<T>,
{
    fn value(&self, point: &Point<T>) -> T {
        (self.value_fn)(point)
    }

    fn gradient(&self, point: &Point<T>) -> Point<T> {
        (self.gradient_fn)(point)
    }
}

impl<T, V, G> Objective<T> for FnObjective<V, G>
where
    T: Scalar,
    V: Fn(&Point<T>) -> T + Clone,
    G: Fn(&Point<T>) -> Point<T> + Clone,
{
    type Evaluator = Self;

    fn compile(&self, _dimension: usize) -> Result<Self> {
        Ok(self.clone())
    }
}
