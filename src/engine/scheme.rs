//! Explicit finite-difference stencils for `u_t + c u_x = 0`.
//!
//! Each scheme is a row in a table of pure functions: one update for
//! interior points and one for each periodic boundary point. With
//! `nu = c * gamma` and `gamma = dt / h`:
//!
//! ```text
//! Downwind        u'[i] = u[i] - nu (u[i+1] - u[i])
//! Naive centered  u'[i] = u[i] - gamma (u[i+1] - u[i-1]) / 2
//! Lax-Friedrichs  u'[i] = (u[i+1] + u[i-1]) / 2 - nu (u[i+1] - u[i-1]) / 2
//! ```
//!
//! Index `0` and index `n-1` are each other's neighbours. Every update reads
//! the pre-step values only; the output always goes to a separate buffer.
//!
//! No stability guard is applied. Downwind with `c > 0` and the naive
//! centered scheme grow without bound, and that growth is recorded as is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::clock::TimeConfig;
use crate::engine::grid::Grid;
use crate::engine::state::State;
use crate::error::{AdvectError, AdvectResult};

/// Wave speed and grid ratio shared by all stencils.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeParams {
    /// Wave speed `c`; the sign sets the propagation direction.
    wave_speed: f64,
    /// Grid ratio `gamma = dt / h`.
    gamma: f64,
}

impl SchemeParams {
    /// Derive the parameters from the wave speed and the discretization.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `c` is not finite.
    pub fn new(wave_speed: f64, grid: &Grid, time: &TimeConfig) -> AdvectResult<Self> {
        if !wave_speed.is_finite() {
            return Err(AdvectError::invalid_parameter(
                "c",
                wave_speed,
                "wave speed must be finite",
            ));
        }
        Ok(Self {
            wave_speed,
            gamma: time.dt() / grid.spacing(),
        })
    }

    /// Wave speed `c`.
    #[must_use]
    pub const fn wave_speed(&self) -> f64 {
        self.wave_speed
    }

    /// Grid ratio `gamma = dt / h`.
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Courant product `c * gamma`.
    #[must_use]
    pub fn courant(&self) -> f64 {
        self.wave_speed * self.gamma
    }

    fn coefficients(&self) -> Coefficients {
        Coefficients {
            gamma: self.gamma,
            courant: self.courant(),
        }
    }
}

/// Available time-stepping schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// First-order one-sided difference toward `i+1`.
    Downwind,
    /// Centered difference, forward Euler in time.
    NaiveCentered,
    /// Centered difference with neighbour averaging.
    #[default]
    LaxFriedrichs,
}

impl Scheme {
    /// All schemes, in declaration order.
    pub const ALL: [Self; 3] = [Self::Downwind, Self::NaiveCentered, Self::LaxFriedrichs];

    /// Configuration name (`downwind`, `naive-centered`, `lax-friedrichs`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Downwind => "downwind",
            Self::NaiveCentered => "naive-centered",
            Self::LaxFriedrichs => "lax-friedrichs",
        }
    }

    /// Caption for plots and reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Downwind => "Downwind Scheme",
            Self::NaiveCentered => "Naive Scheme",
            Self::LaxFriedrichs => "Lax-Friedrichs Scheme",
        }
    }

    /// Whether the update reads the wave speed `c`.
    ///
    /// The naive centered update uses `gamma` alone, i.e. it advects at unit
    /// speed whatever `c` is configured.
    #[must_use]
    pub const fn uses_wave_speed(self) -> bool {
        !matches!(self, Self::NaiveCentered)
    }

    fn stencil(self) -> &'static Stencil {
        match self {
            Self::Downwind => &DOWNWIND,
            Self::NaiveCentered => &NAIVE_CENTERED,
            Self::LaxFriedrichs => &LAX_FRIEDRICHS,
        }
    }

    /// Advance `u` by one time step into a new state.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `u` does not have one value per grid point.
    pub fn step(self, u: &State, grid: &Grid, params: &SchemeParams) -> AdvectResult<State> {
        if u.len() != grid.n() {
            return Err(AdvectError::ShapeMismatch {
                expected: grid.n(),
                actual: u.len(),
            });
        }
        let mut next = State::zeros(u.len());
        self.step_into(u, &mut next, params)?;
        Ok(next)
    }

    /// Advance `u` by one time step, writing every point of `out`.
    ///
    /// `u` is only read, so boundary and interior updates all see the same
    /// pre-step snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the buffers differ in length or hold fewer
    /// than two points.
    pub fn step_into(self, u: &State, out: &mut State, params: &SchemeParams) -> AdvectResult<()> {
        let n = u.len();
        if out.len() != n || n < 2 {
            return Err(AdvectError::ShapeMismatch {
                expected: n.max(2),
                actual: out.len(),
            });
        }

        let stencil = self.stencil();
        let k = params.coefficients();
        let src = u.values();
        let dst = out.values_mut();

        for (o, w) in dst[1..n - 1].iter_mut().zip(src.windows(3)) {
            *o = (stencil.interior)(k, w[0], w[1], w[2]);
        }
        dst[0] = (stencil.first)(k, src);
        dst[n - 1] = (stencil.last)(k, src);

        Ok(())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = AdvectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "downwind" => Ok(Self::Downwind),
            "naive-centered" | "naive" => Ok(Self::NaiveCentered),
            "lax-friedrichs" | "lf" => Ok(Self::LaxFriedrichs),
            other => Err(AdvectError::config(format!(
                "unknown scheme '{other}' (expected downwind, naive-centered or lax-friedrichs)"
            ))),
        }
    }
}

/// Per-step constants handed to every stencil function.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    gamma: f64,
    courant: f64,
}

/// Interior update from `(u[i-1], u[i], u[i+1])`.
type InteriorFn = fn(Coefficients, f64, f64, f64) -> f64;

/// Boundary update reading the whole pre-step snapshot (length >= 2).
type EdgeFn = fn(Coefficients, &[f64]) -> f64;

struct Stencil {
    interior: InteriorFn,
    first: EdgeFn,
    last: EdgeFn,
}

static DOWNWIND: Stencil = Stencil {
    interior: downwind_interior,
    first: downwind_first,
    last: downwind_last,
};

static NAIVE_CENTERED: Stencil = Stencil {
    interior: naive_interior,
    first: naive_first,
    last: naive_last,
};

static LAX_FRIEDRICHS: Stencil = Stencil {
    interior: lax_friedrichs_interior,
    first: lax_friedrichs_first,
    last: lax_friedrichs_last,
};

// `c * gamma * d` evaluates as `(c*gamma)*d`; halving follows the product.

fn downwind_interior(k: Coefficients, _left: f64, center: f64, right: f64) -> f64 {
    center - k.courant * (right - center)
}

fn downwind_first(k: Coefficients, u: &[f64]) -> f64 {
    u[0] - k.courant * (u[1] - u[0])
}

fn downwind_last(k: Coefficients, u: &[f64]) -> f64 {
    let n = u.len();
    u[n - 1] - k.courant * (u[0] - u[n - 1])
}

fn naive_interior(k: Coefficients, left: f64, center: f64, right: f64) -> f64 {
    center - k.gamma * (right - left) / 2.0
}

fn naive_first(k: Coefficients, u: &[f64]) -> f64 {
    let n = u.len();
    u[0] - k.gamma * (u[1] - u[n - 1]) / 2.0
}

fn naive_last(k: Coefficients, u: &[f64]) -> f64 {
    let n = u.len();
    u[n - 1] - k.gamma * (u[0] - u[n - 2]) / 2.0
}

fn lax_friedrichs_interior(k: Coefficients, left: f64, _center: f64, right: f64) -> f64 {
    (right + left) / 2.0 - k.courant * (right - left) / 2.0
}

fn lax_friedrichs_first(k: Coefficients, u: &[f64]) -> f64 {
    let n = u.len();
    (u[1] + u[n - 1]) / 2.0 - k.courant * (u[1] - u[n - 1]) / 2.0
}

// The average keeps u[n-1] itself while the difference wraps to u[0].
fn lax_friedrichs_last(k: Coefficients, u: &[f64]) -> f64 {
    let n = u.len();
    (u[n - 1] + u[n - 2]) / 2.0 - k.courant * (u[0] - u[n - 2]) / 2.0
}
