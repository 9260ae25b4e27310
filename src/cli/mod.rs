//! Command-line front end.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point [`run_cli`] is called from `main.rs` with parsed
//! arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{execute_run, print_preset, run_cli, run_config, RunOverrides};
pub use output::{
    print_help, print_run_summary, print_schemes, print_version, summary_rows, SummaryRow,
    SUMMARY_ROWS,
};
