//! Core integration engine.
//!
//! Ties the discretization together:
//! - [`Grid`] lays out the spatial axis and samples the initial condition
//! - [`TimeConfig`] fixes the step count
//! - [`Scheme`] advances one time level with periodic wrap
//! - [`Integrator`] drives the loop and records every level into a [`History`]
//!
//! The loop keeps two buffers and swaps them after each step, so no update
//! ever reads a value written during the same step.

pub mod clock;
pub mod grid;
pub mod scheme;
pub mod state;

pub use clock::TimeConfig;
pub use grid::{top_hat, Grid};
pub use scheme::{Scheme, SchemeParams};
pub use state::State;

use crate::config::AdvectConfig;
use crate::error::{AdvectError, AdvectResult};
use crate::replay::History;

/// Integrate the top-hat initial condition for `m` steps.
///
/// The returned history holds `m + 1` snapshots; index 0 is the initial
/// condition and index `i` is the state after `i` steps. Unstable
/// combinations run to completion, growth included.
///
/// # Errors
///
/// Returns `ShapeMismatch` if the grid has fewer than two points, or
/// `InvalidParameter` if the `m + 1` snapshots cannot be allocated.
pub fn run(
    grid: &Grid,
    time: &TimeConfig,
    params: &SchemeParams,
    scheme: Scheme,
) -> AdvectResult<History> {
    integrate(grid.sample_initial(), time, params, scheme)
}

/// Owned run setup: everything needed to produce a [`History`].
#[derive(Debug, Clone, PartialEq)]
pub struct Integrator {
    grid: Grid,
    time: TimeConfig,
    params: SchemeParams,
    scheme: Scheme,
}

impl Integrator {
    /// Assemble an integrator from already-validated parts.
    #[must_use]
    pub const fn new(grid: Grid, time: TimeConfig, params: SchemeParams, scheme: Scheme) -> Self {
        Self {
            grid,
            time,
            params,
            scheme,
        }
    }

    /// Build the grid, time axis and parameters described by a config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if any configured value is rejected by
    /// [`Grid::build`], [`TimeConfig::new`] or [`SchemeParams::new`].
    pub fn from_config(config: &AdvectConfig) -> AdvectResult<Self> {
        let grid = config.grid()?;
        let time = config.time()?;
        let params = config.params(&grid, &time)?;
        Ok(Self::new(grid, time, params, config.scheme()))
    }

    /// Spatial grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Time axis.
    #[must_use]
    pub const fn time(&self) -> &TimeConfig {
        &self.time
    }

    /// Stencil parameters.
    #[must_use]
    pub const fn params(&self) -> &SchemeParams {
        &self.params
    }

    /// Selected scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Integrate from the top-hat initial condition.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the grid has fewer than two points, or
    /// `InvalidParameter` if the history cannot be allocated.
    pub fn run(&self) -> AdvectResult<History> {
        integrate(self.grid.sample_initial(), &self.time, &self.params, self.scheme)
    }

    /// Integrate from a caller-supplied initial state.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `initial` does not have one value per
    /// grid point, or `InvalidParameter` if the history cannot be allocated.
    pub fn run_with(&self, initial: State) -> AdvectResult<History> {
        if initial.len() != self.grid.n() {
            return Err(AdvectError::ShapeMismatch {
                expected: self.grid.n(),
                actual: initial.len(),
            });
        }
        integrate(initial, &self.time, &self.params, self.scheme)
    }
}

fn integrate(
    initial: State,
    time: &TimeConfig,
    params: &SchemeParams,
    scheme: Scheme,
) -> AdvectResult<History> {
    let n = initial.len();
    let steps = time.steps();

    tracing::info!(
        scheme = %scheme,
        n,
        steps,
        gamma = params.gamma(),
        courant = params.courant(),
        "integration started"
    );

    let snapshots = time.snapshots();
    let footprint = snapshots
        .checked_mul(n)
        .and_then(|values| values.checked_mul(std::mem::size_of::<f64>()));
    if !matches!(footprint, Some(bytes) if bytes <= isize::MAX as usize) {
        return Err(AdvectError::invalid_parameter(
            "dt",
            time.dt(),
            format!("{snapshots} snapshots of {n} points exceed addressable memory"),
        ));
    }
    let mut history = History::try_with_capacity(time.dt(), snapshots).map_err(|e| {
        AdvectError::invalid_parameter(
            "dt",
            time.dt(),
            format!("cannot allocate {snapshots} snapshots: {e}"),
        )
    })?;
    let mut current = initial;
    let mut next = State::zeros(n);
    history.push(current.clone());

    for step in 1..=steps {
        scheme.step_into(&current, &mut next, params)?;
        std::mem::swap(&mut current, &mut next);
        history.push(current.clone());
        tracing::trace!(step, max_abs = current.max_abs(), "step complete");
    }

    if !current.all_finite() {
        tracing::warn!(scheme = %scheme, "solution overflowed to non-finite values");
    }
    tracing::debug!(
        snapshots = history.len(),
        final_sum = current.sum(),
        final_max_abs = current.max_abs(),
        "integration finished"
    );

    Ok(history)
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every scheme records exactly m + 1 snapshots of n values.
        #[test]
        fn prop_history_length(
            half_width in 0.5f64..5.0,
            cells in 2usize..60,
            final_time in 0.01f64..1.0,
            dt in 0.005f64..0.2,
            wave_speed in -4.0f64..4.0,
        ) {
            let grid = Grid::build(half_width, 2.0 * half_width / cells as f64).unwrap();
            let time = TimeConfig::new(final_time, dt).unwrap();
            let params = SchemeParams::new(wave_speed, &grid, &time).unwrap();

            for scheme in Scheme::ALL {
                let history = run(&grid, &time, &params, scheme).unwrap();
                prop_assert_eq!(history.len(), time.steps() + 1);
                prop_assert!(history.states().iter().all(|s| s.len() == grid.n()));
                prop_assert_eq!(history.at(0).unwrap(), &grid.sample_initial());
            }
        }
    }
}
