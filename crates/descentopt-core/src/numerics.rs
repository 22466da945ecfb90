//! Vector primitives shared by the descent optimizers.
//!
//! These are thin, dimension-checked helpers over `nalgebra` expressions.
//! Note that [`norm_squared`] returns the *sum of squares*: the gradient-norm
//! early-stop call sites take the square root themselves, while Polak-Ribiere
//! and the Armijo slope use the squared/dot forms directly. Keeping the
//! rooting at the call site preserves the convergence thresholds of each
//! algorithm.

use crate::types::{Point, Scalar};
use num_traits::Float;

/// Element-wise linear combination `scale_a * a + scale_b * b`.
///
/// Used both for candidate-point construction (`x - step * g`) and for
/// direction blending in conjugate gradient (`omega * s - g`).
///
/// # Panics
///
/// Panics in debug builds if the vectors have different dimensions.
pub fn scaled_sum<T: Scalar>(a: &Point<T>, b: &Point<T>, scale_a: T, scale_b: T) -> Point<T> {
    debug_assert_eq!(a.len(), b.len(), "scaled_sum dimension mismatch");
    a * scale_a + b * scale_b
}

/// Sum of squares of the elements of `v`.
///
/// This is the *squared* Euclidean norm; callers take the square root where a
/// true norm is needed.
pub fn norm_squared<T: Scalar>(v: &Point<T>) -> T {
    v.dot(v)
}

/// Negates every element of `v` in place.
pub fn flip_sign<T: Scalar>(v: &mut Point<T>) {
    v.neg_mut();
}

/// Returns true iff `x` is finite and not NaN.
pub fn is_normal<T: Scalar>(x: T) -> bool {
    <T as Float>::is_finite(x)
}

/// Polak-Ribiere coefficient `dot(a, a - b) / dot(b, b)`.
///
/// `a` is the new gradient and `b` the previous one. Callers clamp the result
/// to be nonnegative (the PR+ restart rule).
///
/// # Panics
///
/// Panics in debug builds if the vectors have different dimensions.
pub fn polak_ribiere<T: Scalar>(a: &Point<T>, b: &Point<T>) -> T {
    debug_assert_eq!(a.len(), b.len(), "polak_ribiere dimension mismatch");
    a.dot(&(a - b)) / b.dot(b)
}
