//! Delta robot kinematics calculator.
//!
//! Provides four modes of operation:
//! - `repl` (default): settings menu followed by an interactive command prompt
//! - `inverse`: actuator angles for one end-effector position
//! - `forward`: end-effector position for one set of actuator angles
//! - `params`: print the current model parameters

mod command;
mod format;
mod session;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use delta_core::{DeltaError, GeometryConfig, JointAngles, KinematicsError, Point3};
use delta_kinematics::DeltaRobot;

use crate::command::parse_values;
use crate::format::{format_angles, format_parameters, format_point};
use crate::session::Session;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Delta robot forward and inverse kinematics.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Model parameters file (TOML). Missing file means the reference robot.
    #[arg(short, long, global = true, default_value = "delta.toml")]
    config: PathBuf,

    /// Log solver details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu and command prompt.
    Repl,

    /// Calculate upper arm angles from end effector's coordinates.
    #[command(allow_negative_numbers = true)]
    Inverse {
        /// x, y, z separated by spaces or commas (`0 0 -300`, `0,0,-300`).
        #[arg(required = true, num_args = 1..=3, value_name = "X, Y, Z")]
        values: Vec<String>,
    },

    /// Calculate end effector's coordinates from upper arm angles (degrees).
    #[command(allow_negative_numbers = true)]
    Forward {
        /// a1, a2, a3 separated by spaces or commas (`10 -5 20`, `10,-5,20`).
        #[arg(required = true, num_args = 1..=3, value_name = "A1, A2, A3")]
        values: Vec<String>,
    },

    /// Print the current model parameters.
    Params,
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_repl(config_path: &Path, geometry: GeometryConfig) -> Result<(), DeltaError> {
    run_session(io::stdin().lock(), io::stdout().lock(), config_path, geometry)
}

fn run_session(
    input: impl BufRead,
    output: impl Write,
    config_path: &Path,
    geometry: GeometryConfig,
) -> Result<(), DeltaError> {
    let mut session = Session::new(input, output, geometry).with_save_path(config_path);
    let end = session.run()?;
    tracing::debug!(
        saved = end.saved,
        version = session.current().version(),
        geometry = ?end.geometry,
        "session ended"
    );
    Ok(())
}

fn run_inverse(robot: &DeltaRobot, target: Point3) -> Result<(), DeltaError> {
    let angles = robot.inverse(target)?;
    println!("{}", format_angles(&angles));
    Ok(())
}

fn run_forward(robot: &DeltaRobot, angles: JointAngles) -> Result<(), DeltaError> {
    let point = robot.forward(angles)?;
    println!("{}", format_point(&point));
    Ok(())
}

fn run_params(geometry: &GeometryConfig) {
    println!("Current model parameters:");
    println!("{}", format_parameters(geometry));
}

/// Parse a subcommand's three values the way the session prompt does,
/// exiting with a usage error otherwise.
fn values_or_exit(command: &'static str, values: &[String]) -> [f64; 3] {
    parse_values(command, values)
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::ValueValidation, e).exit())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn run(cli: Cli) -> Result<(), DeltaError> {
    let geometry = GeometryConfig::from_file_or_default(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), ?geometry, "model parameters loaded");
    let robot = DeltaRobot::new(geometry);

    match cli.command {
        Some(Commands::Inverse { values }) => {
            run_inverse(&robot, Point3::from(values_or_exit("inverse", &values)))
        }
        Some(Commands::Forward { values }) => {
            run_forward(&robot, JointAngles::from(values_or_exit("forward", &values)))
        }
        Some(Commands::Params) => {
            run_params(robot.geometry());
            Ok(())
        }
        Some(Commands::Repl) | None => run_repl(&cli.config, geometry),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DeltaError::Kinematics(KinematicsError::NoSolution { .. })) => {
            println!("no solution");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inverse_values(args: &[&str]) -> [f64; 3] {
        let cli = Cli::try_parse_from(args).unwrap();
        let Some(Commands::Inverse { values }) = cli.command else {
            panic!("expected inverse subcommand");
        };
        parse_values("inverse", &values).unwrap()
    }

    #[test]
    fn cli_accepts_negative_coordinates() {
        assert_eq!(
            inverse_values(&["delta", "inverse", "0", "0", "-300"]),
            [0.0, 0.0, -300.0]
        );
    }

    #[test]
    fn cli_accepts_comma_separated_values() {
        assert_eq!(
            inverse_values(&["delta", "inverse", "0,", "0,", "-300"]),
            [0.0, 0.0, -300.0]
        );
        assert_eq!(
            inverse_values(&["delta", "inverse", "0,-220,-200"]),
            [0.0, -220.0, -200.0]
        );
    }

    #[test]
    fn cli_defaults_to_repl() {
        let cli = Cli::try_parse_from(["delta"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("delta.toml"));
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["delta", "forward", "10", "-5", "20", "-c", "robot.toml", "-v"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Forward { .. })));
        assert_eq!(cli.config, PathBuf::from("robot.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn cli_rejects_missing_values() {
        assert!(Cli::try_parse_from(["delta", "forward"]).is_err());

        let cli = Cli::try_parse_from(["delta", "forward", "10", "20"]).unwrap();
        let Some(Commands::Forward { values }) = cli.command else {
            panic!("expected forward subcommand");
        };
        assert!(parse_values("forward", &values).is_err());
    }

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn terminal_failure_is_a_session_error() {
        let err = run_session(
            "4\n-q\n".as_bytes(),
            ClosedOutput,
            Path::new("unused.toml"),
            GeometryConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DeltaError::Session(_)));
    }

    #[test]
    fn no_solution_surfaces_as_kinematics_error() {
        let robot = DeltaRobot::with_defaults();
        let err = run_inverse(&robot, Point3::new(0.0, 0.0, -1000.0)).unwrap_err();
        assert!(matches!(
            err,
            DeltaError::Kinematics(KinematicsError::NoSolution { .. })
        ));
    }
}
