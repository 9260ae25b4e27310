//! advecta CLI - 1D linear advection solver
//!
//! Command-line interface for running configured integrations.

use std::process::ExitCode;

use advecta::cli::{run_cli, Args};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "advecta=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    run_cli(Args::parse())
}
