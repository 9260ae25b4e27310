//! # advecta
//!
//! Explicit finite-difference integration of the 1D linear advection
//! equation `u_t + c u_x = 0` on `[-L, L]` with periodic wrap.
//!
//! Three stencils are available:
//! - Downwind (forward difference, upwind for `c < 0`)
//! - Naive centered
//! - Lax-Friedrichs
//!
//! Every time level is recorded into a [`History`](replay::History) that
//! downstream consumers walk as `(time, state)` frames.
//!
//! ## Example
//!
//! ```rust
//! use advecta::prelude::*;
//!
//! let grid = Grid::build(5.0, 0.1)?;
//! let time = TimeConfig::new(2.0, 0.025)?;
//! let params = SchemeParams::new(2.0, &grid, &time)?;
//!
//! let history = run(&grid, &time, &params, Scheme::LaxFriedrichs)?;
//! assert_eq!(history.len(), 81);
//! # Ok::<(), AdvectError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Stencil arithmetic must keep its association order
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::manual_midpoint,   // (a + b) / 2 is the stencil, not a midpoint
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod replay;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AdvectConfig, AdvectConfigBuilder};
    pub use crate::engine::{run, Grid, Integrator, Scheme, SchemeParams, State, TimeConfig};
    pub use crate::error::{AdvectError, AdvectResult};
    pub use crate::replay::{Frame, History, HistoryArchive};
}

/// Re-export for public API
pub use error::{AdvectError, AdvectResult};
