//! Named numeric parameter overrides for optimizers.
//!
//! [`OptimizerParameters`] is a string-keyed override map kept at the caller
//! boundary (CLI/JSON ingestion and ad-hoc tuning). Every value is stored
//! uniformly as `f64`; reads coerce to the requested numeric type, so a
//! parameter set as an integer may be read back as a float and vice versa.
//! Unset names always yield the caller-supplied default, never an error, which
//! is also why unknown parameter names are silently ignored.
//!
//! The concrete optimizers translate this map into their typed configuration
//! records before use; see `GradientDescentConfig::from_parameters` and
//! friends in `descentopt-optim`.

use std::collections::BTreeMap;

mod private {
    pub trait Sealed {}
}

/// Numeric types accepted by the parameter store.
///
/// The trait is sealed and implemented for the primitive numeric types only,
/// so passing a non-numeric value is a compile-time rejection rather than a
/// runtime error.
pub trait ParameterValue: Copy + private::Sealed {
    /// Widens the value to the uniform `f64` storage representation.
    fn into_f64(self) -> f64;
    /// Narrows a stored `f64` back to this type, following ordinary numeric
    /// conversion rules (truncation toward zero for integer targets).
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_parameter_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            impl ParameterValue for $t {
                #[inline]
                fn into_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                #[allow(clippy::unnecessary_cast)]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_parameter_value!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A mapping from parameter name to a numeric value.
///
/// # Example
///
/// ```
/// use descentopt_core::params::OptimizerParameters;
///
/// let params = OptimizerParameters::new()
///     .with("max_steps", 100usize)
///     .with("grad_eps", 1e-6);
///
/// assert_eq!(params.get("max_steps", 5000usize), 100);
/// assert_eq!(params.get("grad_eps", 1e-8), 1e-6);
/// // Unset names fall back to the default.
/// assert_eq!(params.get("bt_alpha", 0.5), 0.5);
/// // Reads coerce: a value set as usize can be read as f64.
/// assert_eq!(params.get("max_steps", 0.0), 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptimizerParameters {
    values: BTreeMap<String, f64>,
}

impl OptimizerParameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, overwriting any prior value.
    pub fn set<V: ParameterValue>(&mut self, name: impl Into<String>, value: V) -> &mut Self {
        self.values.insert(name.into(), value.into_f64());
        self
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with<V: ParameterValue>(mut self, name: impl Into<String>, value: V) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value stored under `name` coerced to `V`, or `default` if
    /// `name` was never set.
    pub fn get<V: ParameterValue>(&self, name: &str, default: V) -> V {
        match self.values.get(name) {
            Some(&stored) => V::from_f64(stored),
            None => default,
        }
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no parameter has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
