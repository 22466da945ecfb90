//! Helpers shared by the three optimizers.

use descentopt_core::types::Scalar;

/// The improvement test applied identically by all three algorithms.
///
/// An iteration's improvement is insufficient when the relative improvement
/// `next / current` exceeds `1 - min_relative` OR the absolute improvement
/// `current - next` falls below `min_absolute`. Note the NaN-propagation
/// behavior is deliberate: a NaN ratio fails the first comparison and the
/// absolute test then decides alone.
pub(crate) fn insufficient_improvement<T: Scalar>(
    next_value: T,
    current_value: T,
    min_relative: T,
    min_absolute: T,
) -> bool {
    next_value / current_value > T::one() - min_relative
        || current_value - next_value < min_absolute
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient_improvement() {
        // Halving the value is plenty under the default thresholds.
        assert!(!insufficient_improvement(0.5, 1.0, 1e-25, 1e-25));
    }

    #[test]
    fn test_no_change_is_insufficient() {
        assert!(insufficient_improvement(1.0, 1.0, 1e-25, 1e-25));
    }

    #[test]
    fn test_tiny_absolute_improvement_is_insufficient() {
        assert!(insufficient_improvement(1.0 - 1e-30, 1.0, 1e-25, 1e-25));
    }

    #[test]
    fn test_zero_over_zero() {
        // 0/0 is NaN and fails the relative test, but the absolute test
        // still flags the lack of progress.
        assert!(insufficient_improvement(0.0, 0.0, 1e-25, 1e-25));
    }
}
