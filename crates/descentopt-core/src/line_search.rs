//! Backtracking line search with the Armijo sufficient-decrease condition.
//!
//! Given a point `x` and a descent direction `d`, the search starts at step
//! size `t = 1` and accepts as soon as
//!
//! ```text
//! f(x + t d) <= f(x) + alpha * t * <grad f(x), d>
//! ```
//!
//! holds, shrinking `t` by the factor `beta` otherwise. The search never
//! fails: when the shrink budget is exhausted it returns the last-tried
//! point, leaving it to the caller's improvement test to notice that nothing
//! was gained. Both backtracking-based optimizers share this routine with
//! identical parameters, which keeps them comparable against the same
//! fixtures.
//!
//! A NaN objective value fails the accept test (any comparison with NaN is
//! false) and therefore keeps shrinking, so the search naturally backs away
//! from regions where the objective is undefined.

use crate::objective::ObjectiveEvaluator;
use crate::numerics::scaled_sum;
use crate::optimizer::ValueAndPoint;
use crate::types::{Point, Scalar};
use log::trace;

/// Armijo backtracking line search.
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingLineSearch<T: Scalar> {
    /// Sufficient-decrease parameter `alpha` in (0, 1)
    pub alpha: T,
    /// Step shrink factor `beta` in (0, 1)
    pub beta: T,
    /// Maximum number of shrink steps before accepting the last-tried point
    pub max_steps: usize,
}

impl<T: Scalar> BacktrackingLineSearch<T> {
    /// Creates a line search with the given Armijo parameters.
    pub fn new(alpha: T, beta: T, max_steps: usize) -> Self {
        Self {
            alpha,
            beta,
            max_steps,
        }
    }

    /// Searches from `point` along `direction` and returns the accepted step.
    ///
    /// `direction` is expected to be a descent direction (negative slope);
    /// with a non-descent direction the search degrades to returning the
    /// shortest tried step.
    pub fn search<E: ObjectiveEvaluator<T>>(
        &self,
        evaluator: &E,
        point: &Point<T>,
        direction: &Point<T>,
    ) -> ValueAndPoint<T> {
        let current_value = evaluator.value(point);
        let gradient = evaluator.gradient(point);
        let slope = gradient.dot(direction);

        let mut step = T::one();
        let mut candidate = scaled_sum(point, direction, T::one(), step);
        let mut value = evaluator.value(&candidate);

        let mut shrinks = 0;
        // The negated comparison is load-bearing: a NaN value must keep
        // shrinking, and `value > bound` would accept it.
        #[allow(clippy::neg_cmp_op_on_partial_ord)]
        while !(value <= current_value + self.alpha * step * slope) && shrinks < self.max_steps {
            step = step * self.beta;
            candidate = scaled_sum(point, direction, T::one(), step);
            value = evaluator.value(&candidate);
            shrinks += 1;
            trace!(
                "backtracking: shrink {} to t = {}, f = {}",
                shrinks,
                step,
                value
            );
        }

        ValueAndPoint::new(value, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{Objective, QuadraticObjective};
    use approx::assert_relative_eq;

    fn quadratic_evaluator() -> impl ObjectiveEvaluator<f64> {
        <QuadraticObjective as Objective<f64>>::compile(&QuadraticObjective, 2)
            .expect("compile never fails")
    }

    #[test]
    fn test_accepts_decreasing_step() {
        let evaluator = quadratic_evaluator();
        let search = BacktrackingLineSearch::new(0.5, 0.8, 100);

        let point = Point::from_vec(vec![10.0, 10.0]);
        let direction = Point::from_vec(vec![-20.0, -20.0]); // -gradient

        let result = search.search(&evaluator, &point, &direction);
        assert!(result.value < 200.0);
        assert!(result.value.is_finite());
    }

    #[test]
    fn test_full_step_accepted_when_sufficient() {
        // f(x) = x^2 from x = 1 along d = -1: f(0) = 0 <= 1 + 0.5 * 1 * (-2).
        let evaluator = quadratic_evaluator();
        let search = BacktrackingLineSearch::new(0.5, 0.8, 100);

        let point = Point::from_vec(vec![1.0, 0.0]);
        let direction = Point::from_vec(vec![-1.0, 0.0]);

        let result = search.search(&evaluator, &point, &direction);
        assert_relative_eq!(result.value, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.point[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_direction_accepts_immediately() {
        let evaluator = quadratic_evaluator();
        let search = BacktrackingLineSearch::new(0.5, 0.8, 100);

        let point = Point::from_vec(vec![2.0, -1.0]);
        let direction = Point::from_vec(vec![0.0, 0.0]);

        let result = search.search(&evaluator, &point, &direction);
        assert_relative_eq!(result.value, 5.0, epsilon = 1e-12);
        assert_eq!(result.point, point);
    }

    #[test]
    fn test_budget_exhaustion_returns_last_tried_point() {
        // An uphill "descent" direction can never satisfy Armijo; the search
        // must quietly return the shortest tried step instead of failing.
        let evaluator = quadratic_evaluator();
        let search = BacktrackingLineSearch::new(0.5, 0.5, 4);

        let point = Point::from_vec(vec![1.0, 0.0]);
        let direction = Point::from_vec(vec![1.0, 0.0]); // uphill

        let result = search.search(&evaluator, &point, &direction);
        // Four halvings of t = 1 leave t = 1/16.
        assert_relative_eq!(result.point[0], 1.0 + 1.0 / 16.0, epsilon = 1e-12);
        assert_relative_eq!(
            result.value,
            (1.0 + 1.0 / 16.0) * (1.0 + 1.0 / 16.0),
            epsilon = 1e-12
        );
    }
}
