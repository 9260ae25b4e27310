//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;

use crate::config::AdvectConfig;
use crate::engine::{Integrator, Scheme};
use crate::error::AdvectResult;
use crate::replay::archive::DEFAULT_COMPRESSION_LEVEL;
use crate::replay::{History, HistoryArchive};

use super::output::{print_help, print_run_summary, print_schemes, print_version};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run {
            config_path,
            scheme_override,
            wave_speed_override,
            archive_path,
            verbose,
        } => run_config(
            &config_path,
            &RunOverrides {
                scheme: scheme_override,
                wave_speed: wave_speed_override,
            },
            archive_path.as_deref(),
            verbose,
        ),
        Command::Preset { scheme } => print_preset(scheme),
        Command::Schemes => {
            print_schemes();
            ExitCode::SUCCESS
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Command-line values that replace configured ones.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunOverrides {
    /// Replacement scheme.
    pub scheme: Option<Scheme>,
    /// Replacement wave speed.
    pub wave_speed: Option<f64>,
}

impl RunOverrides {
    /// Apply the overrides to a loaded config.
    pub fn apply(&self, config: &mut AdvectConfig) {
        if let Some(scheme) = self.scheme {
            config.scheme.kind = scheme;
        }
        if let Some(c) = self.wave_speed {
            config.scheme.wave_speed = c;
        }
    }
}

/// Load, override and integrate a configured run.
///
/// # Errors
///
/// Returns error if the config cannot be loaded or the overridden values
/// are rejected by the core constructors.
pub fn execute_run(path: &Path, overrides: &RunOverrides) -> AdvectResult<(Integrator, History)> {
    let mut config = AdvectConfig::load(path)?;
    overrides.apply(&mut config);
    tracing::debug!(path = %path.display(), scheme = %config.scheme(), "config loaded");

    let integrator = Integrator::from_config(&config)?;
    let history = integrator.run()?;
    Ok((integrator, history))
}

/// Run a config file, print the summary and optionally archive the history.
#[must_use]
pub fn run_config(
    path: &Path,
    overrides: &RunOverrides,
    archive_path: Option<&Path>,
    verbose: bool,
) -> ExitCode {
    let (integrator, history) = match execute_run(path, overrides) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    print_run_summary(&integrator, &history, verbose);

    if let Some(archive_path) = archive_path {
        let written = HistoryArchive::create(
            &history,
            integrator.grid(),
            integrator.scheme(),
            DEFAULT_COMPRESSION_LEVEL,
        )
        .and_then(|archive| {
            archive.save(archive_path)?;
            Ok(archive.compressed_size())
        });
        match written {
            Ok(bytes) => println!("\nArchive written: {} ({bytes} bytes)", archive_path.display()),
            Err(e) => {
                eprintln!("Error: failed to write archive: {e}");
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}

/// Print the preset YAML for a scheme.
#[must_use]
pub fn print_preset(scheme: Scheme) -> ExitCode {
    match AdvectConfig::preset(scheme).to_yaml() {
        Ok(yaml) => {
            print!("{yaml}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
