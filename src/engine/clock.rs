//! Time discretization.
//!
//! Fixed-step time axis over `[0, T]` with `m = floor(T / dt)` steps.
//! Snapshot `i` is stamped `i * dt`.

use crate::error::{AdvectError, AdvectResult};

/// Final time, time step and the derived step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConfig {
    /// Final simulation time `T`.
    final_time: f64,
    /// Time step `dt`.
    dt: f64,
    /// Number of steps `m`.
    steps: usize,
}

impl TimeConfig {
    /// Create the time axis for final time `T` and step `dt`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `T <= 0`, `dt <= 0`, either value is
    /// not finite, or `T / dt` does not fit a step count.
    pub fn new(final_time: f64, dt: f64) -> AdvectResult<Self> {
        if !(final_time > 0.0) || !final_time.is_finite() {
            return Err(AdvectError::invalid_parameter(
                "T",
                final_time,
                "final time must be positive and finite",
            ));
        }
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(AdvectError::invalid_parameter(
                "dt",
                dt,
                "time step must be positive and finite",
            ));
        }

        let steps = (final_time / dt).floor();
        if !steps.is_finite() || steps >= usize::MAX as f64 {
            return Err(AdvectError::invalid_parameter(
                "dt",
                dt,
                "step count T/dt is not representable",
            ));
        }

        Ok(Self {
            final_time,
            dt,
            steps: steps as usize,
        })
    }

    /// Final simulation time `T`.
    #[must_use]
    pub const fn final_time(&self) -> f64 {
        self.final_time
    }

    /// Time step `dt`.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps `m`.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Number of recorded snapshots, `m + 1`.
    #[must_use]
    pub const fn snapshots(&self) -> usize {
        self.steps + 1
    }

    /// Time stamp of snapshot `i`.
    #[must_use]
    pub fn time_of(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_time_axis() {
        let time = TimeConfig::new(2.0, 0.025).unwrap();
        assert_eq!(time.steps(), 80);
        assert_eq!(time.snapshots(), 81);
        assert!((time.dt() - 0.025).abs() < f64::EPSILON);
        assert!((time.final_time() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_naive_reference_time_axis() {
        let time = TimeConfig::new(1.0, 0.025).unwrap();
        assert_eq!(time.steps(), 40);
    }

    #[test]
    fn test_step_count_floors() {
        let time = TimeConfig::new(1.0, 0.3).unwrap();
        assert_eq!(time.steps(), 3);
    }

    #[test]
    fn test_dt_larger_than_final_time() {
        let time = TimeConfig::new(0.1, 1.0).unwrap();
        assert_eq!(time.steps(), 0);
        assert_eq!(time.snapshots(), 1);
    }

    #[test]
    fn test_time_of() {
        let time = TimeConfig::new(2.0, 0.025).unwrap();
        assert!(time.time_of(0).abs() < f64::EPSILON);
        assert_eq!(time.time_of(4), 4.0 * 0.025);
        assert_eq!(time.time_of(80), 80.0 * 0.025);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(TimeConfig::new(0.0, 0.1).is_err());
        assert!(TimeConfig::new(-1.0, 0.1).is_err());
        assert!(TimeConfig::new(1.0, 0.0).is_err());
        assert!(TimeConfig::new(1.0, -0.1).is_err());
        assert!(TimeConfig::new(f64::NAN, 0.1).is_err());
        assert!(TimeConfig::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_step_count() {
        let err = TimeConfig::new(f64::MAX, f64::MIN_POSITIVE).unwrap_err();
        assert!(matches!(err, AdvectError::InvalidParameter { name: "dt", .. }));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Step count is floor(T/dt).
        #[test]
        fn prop_step_count(final_time in 0.01f64..100.0, dt in 0.001f64..1.0) {
            let time = TimeConfig::new(final_time, dt).unwrap();
            prop_assert_eq!(time.steps(), (final_time / dt).floor() as usize);
            prop_assert_eq!(time.snapshots(), time.steps() + 1);
        }
    }
}
