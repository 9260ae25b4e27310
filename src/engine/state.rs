//! Solution state at one time level.
//!
//! A `State` is the field `u` sampled at every grid point. The integrator
//! keeps two working states (double buffer) and records immutable copies
//! into the history after every step.

use serde::{Deserialize, Serialize};

/// Field values at one time level, one per grid point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    values: Vec<f64>,
}

impl State {
    /// Create a state of `n` zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            values: vec![0.0; n],
        }
    }

    /// Create a state from raw values.
    #[must_use]
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of grid points covered.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len not const in older Rust
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the state holds no values.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable field values.
    #[must_use]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value at grid index `i`, if in range.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    /// Consume the state and return its values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Discrete sum of `u` over all grid points.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Maximum absolute value, `0.0` for an empty state.
    ///
    /// NaN entries propagate: a state containing NaN reports NaN.
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| {
            if v.is_nan() || acc.is_nan() {
                f64::NAN
            } else {
                acc.max(v.abs())
            }
        })
    }

    /// Total variation `sum |u[i+1] - u[i]|` along the axis.
    #[must_use]
    pub fn total_variation(&self) -> f64 {
        self.values.windows(2).map(|w| (w[1] - w[0]).abs()).sum()
    }

    /// Check if all values are finite.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl AsRef<[f64]> for State {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
