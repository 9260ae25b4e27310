//! CLI output formatting.
//!
//! Row selection is kept separate from printing so it can be tested
//! without capturing stdout.

use crate::engine::{Integrator, Scheme};
use crate::replay::History;

/// Snapshot rows shown when not verbose.
pub const SUMMARY_ROWS: usize = 10;

/// One line of the run summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    /// Snapshot index.
    pub index: usize,
    /// Simulation time.
    pub time: f64,
    /// Discrete sum of `u`.
    pub sum: f64,
    /// Largest absolute value.
    pub max_abs: f64,
}

/// Print version information.
pub fn print_version() {
    println!(
        "advecta {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("ADVECTA_GIT_HASH").unwrap_or("unknown")
    );
}

/// Print help message.
pub fn print_help() {
    println!(
        r"advecta - explicit finite-difference solver for u_t + c u_x = 0

USAGE:
    advecta <COMMAND> [OPTIONS]

COMMANDS:
    run <config.yaml>           Integrate a configured run
        --scheme <NAME>         Override the scheme
        -c, --wave-speed <C>    Override the wave speed
        -o, --archive <PATH>    Write the history to a compressed archive
        -v, --verbose           Print every snapshot

    preset <scheme>             Print the reference configuration for a scheme

    schemes                     List available schemes

    help                        Show this help message
    version                     Show version information

SCHEMES:
    downwind                    u'[i] = u[i] - c*gamma*(u[i+1] - u[i])
    naive-centered              u'[i] = u[i] - gamma*(u[i+1] - u[i-1])/2
    lax-friedrichs              u'[i] = (u[i+1] + u[i-1])/2 - c*gamma*(u[i+1] - u[i-1])/2

EXAMPLES:
    advecta preset lax-friedrichs > lf.yaml
    advecta run lf.yaml
    advecta run lf.yaml --scheme downwind --wave-speed -2 --archive dw.adva

Set RUST_LOG=advecta=debug for detailed logging.
"
    );
}

/// List scheme names and captions.
pub fn print_schemes() {
    for scheme in Scheme::ALL {
        let speed = if scheme.uses_wave_speed() {
            ""
        } else {
            "  (ignores wave speed)"
        };
        println!("  {:<16}{}{speed}", scheme.name(), scheme.title());
    }
}

/// Pick the snapshots to report.
///
/// Verbose output lists every snapshot. Otherwise roughly
/// [`SUMMARY_ROWS`] evenly strided snapshots are listed, always including
/// the first and the last.
#[must_use]
pub fn summary_rows(history: &History, verbose: bool) -> Vec<SummaryRow> {
    let len = history.len();
    if len == 0 {
        return Vec::new();
    }
    let stride = if verbose {
        1
    } else {
        (len - 1).div_ceil(SUMMARY_ROWS).max(1)
    };

    history
        .frames()
        .filter(|f| f.index % stride == 0 || f.index == len - 1)
        .map(|f| SummaryRow {
            index: f.index,
            time: f.time,
            sum: f.state.sum(),
            max_abs: f.state.max_abs(),
        })
        .collect()
}

/// Print the run header and snapshot summary.
pub fn print_run_summary(integrator: &Integrator, history: &History, verbose: bool) {
    let grid = integrator.grid();
    let time = integrator.time();
    let params = integrator.params();
    let (lo, hi) = grid.bounds();

    println!("{}", integrator.scheme().title());
    println!("  domain     [{lo}, {hi}], n = {}, h = {}", grid.n(), grid.spacing());
    println!("  time       T = {}, dt = {}, m = {}", time.final_time(), time.dt(), time.steps());
    println!(
        "  stencil    c = {}, gamma = {}, c*gamma = {}",
        params.wave_speed(),
        params.gamma(),
        params.courant()
    );
    println!();
    println!("  {:>6}  {:>10}  {:>16}  {:>16}", "step", "time", "sum", "max|u|");
    for row in summary_rows(history, verbose) {
        println!(
            "  {:>6}  {:>10.4}  {:>16.9}  {:>16.9e}",
            row.index, row.time, row.sum, row.max_abs
        );
    }
}
