//! Type definitions and aliases for descent optimization.
//!
//! This module provides the scalar abstraction and the vector alias used
//! throughout the library. Optimization runs are generic over [`Scalar`],
//! with `f64` as the reference precision.

use nalgebra::{DVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines the numeric traits the optimizers rely on and adds
/// conversion helpers for constants and iteration counts.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Converts from f64 (for algorithm constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for f32/f64.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Converts to f64 (for logging and display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for f32/f64.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Converts from usize (for iteration counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for f32/f64.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {}
impl Scalar for f64 {}

/// A candidate parameter vector with a fixed dimension for the lifetime of
/// one optimization run.
pub type Point<T> = DVector<T>;
