//! Tokenizing and parsing of session commands.
//!
//! Commands are a flag followed by up to three numbers, split on spaces
//! and commas: `-i 10, 20, -250`.

use delta_core::{JointAngles, Point3};
use thiserror::Error;

/// A parsed session command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `-i x, y, z`: actuator angles for an end-effector position.
    Inverse(Point3),
    /// `-f a1, a2, a3`: end-effector position for actuator angles.
    Forward(JointAngles),
    /// `-m`: show the menu.
    Menu,
    /// `-q`: quit without saving model parameters.
    Quit,
    /// `-sq`: save model parameters, then quit.
    SaveAndQuit,
}

/// Command parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} expects {expected} values, got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// Split a line on spaces, tabs and commas, dropping empty tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse one line of session input.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(line);
    let Some((&flag, args)) = tokens.split_first() else {
        return Err(ParseError::Empty);
    };

    match flag {
        "-i" => parse_triple("-i", args).map(|v| Command::Inverse(Point3::from(v))),
        "-f" => parse_triple("-f", args).map(|v| Command::Forward(JointAngles::from(v))),
        "-m" => expect_no_args("-m", args).map(|()| Command::Menu),
        "-q" => expect_no_args("-q", args).map(|()| Command::Quit),
        "-sq" => expect_no_args("-sq", args).map(|()| Command::SaveAndQuit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

fn expect_no_args(command: &'static str, args: &[&str]) -> Result<(), ParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ParseError::WrongArity {
            command,
            expected: 0,
            got: args.len(),
        })
    }
}

/// Parse exactly three finite numbers.
fn parse_triple(command: &'static str, args: &[&str]) -> Result<[f64; 3], ParseError> {
    let [a, b, c] = args else {
        return Err(ParseError::WrongArity {
            command,
            expected: 3,
            got: args.len(),
        });
    };
    Ok([parse_number(a)?, parse_number(b)?, parse_number(c)?])
}

/// Parse three values given as separate arguments, each of which may itself
/// hold several comma-separated numbers.
pub fn parse_values(command: &'static str, args: &[String]) -> Result<[f64; 3], ParseError> {
    let joined = args.join(" ");
    parse_triple(command, &tokenize(&joined))
}

/// Parse a finite float. `NaN` and infinities are rejected.
pub fn parse_number(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(token.to_string()))
}
