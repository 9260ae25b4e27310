//! CLI argument parsing.
//!
//! Parsing never fails: anything it cannot make sense of falls back to
//! [`Command::Help`] after a message on stderr.

use std::path::PathBuf;

use crate::engine::Scheme;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Integrate a configured run
    Run {
        /// Path to the run YAML file.
        config_path: PathBuf,
        /// Optional scheme override.
        scheme_override: Option<Scheme>,
        /// Optional wave speed override.
        wave_speed_override: Option<f64>,
        /// Write the finished history to this archive.
        archive_path: Option<PathBuf>,
        /// Print every snapshot instead of a sample.
        verbose: bool,
    },
    /// Print the reference configuration for a scheme
    Preset {
        /// Scheme whose preset is printed.
        scheme: Scheme,
    },
    /// List the available schemes
    Schemes,
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// Accepts any iterator of strings so it can be driven from tests, not
    /// just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "preset" => Self::parse_preset_command(args),
            "schemes" => Command::Schemes,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires a config path");
            return Command::Help;
        }

        let mut scheme_override = None;
        let mut wave_speed_override = None;
        let mut archive_path = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--scheme" => {
                    let Some(value) = args.get(i + 1) else {
                        eprintln!("Error: '--scheme' requires a value");
                        return Command::Help;
                    };
                    match value.parse::<Scheme>() {
                        Ok(scheme) => scheme_override = Some(scheme),
                        Err(e) => {
                            eprintln!("Error: {e}");
                            return Command::Help;
                        }
                    }
                    i += 2;
                }
                "--wave-speed" | "-c" => {
                    let Some(value) = args.get(i + 1) else {
                        eprintln!("Error: '--wave-speed' requires a value");
                        return Command::Help;
                    };
                    match value.parse::<f64>() {
                        Ok(c) => wave_speed_override = Some(c),
                        Err(_) => {
                            eprintln!("Error: invalid wave speed '{value}'");
                            return Command::Help;
                        }
                    }
                    i += 2;
                }
                "--archive" | "-o" => {
                    let Some(value) = args.get(i + 1) else {
                        eprintln!("Error: '--archive' requires a path");
                        return Command::Help;
                    };
                    archive_path = Some(PathBuf::from(value));
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            config_path: PathBuf::from(&args[2]),
            scheme_override,
            wave_speed_override,
            archive_path,
            verbose,
        }
    }

    fn parse_preset_command(args: &[String]) -> Command {
        let Some(name) = args.get(2) else {
            eprintln!("Error: 'preset' command requires a scheme name");
            return Command::Help;
        };
        match name.parse::<Scheme>() {
            Ok(scheme) => Command::Preset { scheme },
            Err(e) => {
                eprintln!("Error: {e}");
                Command::Help
            }
        }
    }
}
