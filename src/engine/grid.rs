//! Spatial discretization of `[-L, L]`.
//!
//! The axis is laid out like `linspace(-L, L, n)` with
//! `n = floor(2L / h) + 1`: points are `i * step - L` with
//! `step = 2L / (n - 1)`, and the last point is pinned to `+L`.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::engine::state::State;
use crate::error::{AdvectError, AdvectResult};

/// Largest point count whose `f64` buffer stays within `isize::MAX` bytes.
const MAX_POINTS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Uniform 1D grid over `[-half_width, half_width]`.
///
/// Serialized as its `(half_width, spacing)` pair; decoding rebuilds the
/// axis through [`Grid::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec", into = "GridSpec")]
pub struct Grid {
    /// Domain half-width `L`.
    half_width: f64,
    /// Configured spatial step `h`.
    spacing: f64,
    /// Grid point coordinates, `n` of them.
    x: Vec<f64>,
}

impl Grid {
    /// Build the grid for half-width `L` and spatial step `h`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `L <= 0`, `h <= 0`, `h > 2L`, either
    /// value is not finite, or the axis cannot be allocated.
    pub fn build(half_width: f64, spacing: f64) -> AdvectResult<Self> {
        if !(half_width > 0.0) || !half_width.is_finite() {
            return Err(AdvectError::invalid_parameter(
                "L",
                half_width,
                "domain half-width must be positive and finite",
            ));
        }
        if !(spacing > 0.0) || !spacing.is_finite() {
            return Err(AdvectError::invalid_parameter(
                "h",
                spacing,
                "spatial step must be positive and finite",
            ));
        }
        let width = 2.0 * half_width;
        if spacing > width {
            return Err(AdvectError::invalid_parameter(
                "h",
                spacing,
                format!("spatial step exceeds domain width {width}"),
            ));
        }

        let cells = (width / spacing).floor();
        if !cells.is_finite() || cells >= MAX_POINTS as f64 {
            return Err(AdvectError::invalid_parameter(
                "h",
                spacing,
                format!("2L/h = {cells} grid points exceed addressable memory"),
            ));
        }
        let n = cells as usize + 1;

        let x = linspace(-half_width, half_width, n).map_err(|e| {
            AdvectError::invalid_parameter("h", spacing, format!("cannot allocate {n} grid points: {e}"))
        })?;

        Ok(Self {
            half_width,
            spacing,
            x,
        })
    }

    /// Number of grid points `n`.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn n(&self) -> usize {
        self.x.len()
    }

    /// Configured spatial step `h`.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Domain half-width `L`.
    #[must_use]
    pub const fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Domain bounds `(-L, L)`, for axis scaling.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (-self.half_width, self.half_width)
    }

    /// Grid point coordinates.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Sample an arbitrary profile at every grid point.
    #[must_use]
    pub fn sample<F>(&self, profile: F) -> State
    where
        F: Fn(f64) -> f64,
    {
        State::from_values(self.x.iter().map(|&x| profile(x)).collect())
    }

    /// Sample the top-hat initial condition `u0`.
    #[must_use]
    pub fn sample_initial(&self) -> State {
        self.sample(top_hat)
    }
}

/// Initial condition: `1.0` on `|x| <= 1`, `0.0` elsewhere.
#[must_use]
pub fn top_hat(x: f64) -> f64 {
    if x.abs() <= 1.0 {
        1.0
    } else {
        0.0
    }
}

/// `n` evenly spaced points from `start` to `stop`, both included.
fn linspace(start: f64, stop: f64, n: usize) -> Result<Vec<f64>, TryReserveError> {
    let mut points = Vec::new();
    points.try_reserve_exact(n)?;
    if n == 1 {
        points.push(start);
        return Ok(points);
    }
    let step = (stop - start) / (n - 1) as f64;
    points.extend((0..n).map(|i| i as f64 * step + start));
    if let Some(last) = points.last_mut() {
        *last = stop;
    }
    Ok(points)
}

/// Serialized form of a [`Grid`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSpec {
    half_width: f64,
    spacing: f64,
}

impl TryFrom<GridSpec> for Grid {
    type Error = AdvectError;

    fn try_from(spec: GridSpec) -> AdvectResult<Self> {
        Self::build(spec.half_width, spec.spacing)
    }
}

impl From<Grid> for GridSpec {
    fn from(grid: Grid) -> Self {
        Self {
            half_width: grid.half_width,
            spacing: grid.spacing,
        }
    }
}
