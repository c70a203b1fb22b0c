//! Interactive session: the settings menu followed by the command prompt.
//!
//! The session owns the "current robot" as a versioned [`CurrentGeometry`].
//! Edits build a new validated [`GeometryConfig`] and swap it in whole, so a
//! solve always sees one consistent set of link lengths.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use delta_core::{GeometryConfig, GeometryUpdate, KinematicsError};
use delta_kinematics::{forward_kinematics, inverse_kinematics};

use crate::command::{Command, parse_command, parse_number};
use crate::format::{MENU, format_angles, format_commands, format_parameters, format_point};

// ---------------------------------------------------------------------------
// CurrentGeometry
// ---------------------------------------------------------------------------

/// The active geometry plus a counter bumped on every replacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentGeometry {
    geometry: GeometryConfig,
    version: u64,
}

impl CurrentGeometry {
    pub const fn new(geometry: GeometryConfig) -> Self {
        Self {
            geometry,
            version: 0,
        }
    }

    pub const fn get(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Swap in a whole new geometry.
    pub fn replace(&mut self, geometry: GeometryConfig) {
        self.geometry = geometry;
        self.version += 1;
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionEnd {
    pub geometry: GeometryConfig,
    pub saved: bool,
}

enum Step {
    Continue,
    Quit { saved: bool },
}

/// Menu and command loop over any line-based input and output.
pub struct Session<R, W> {
    input: R,
    output: W,
    current: CurrentGeometry,
    save_path: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, geometry: GeometryConfig) -> Self {
        Self {
            input,
            output,
            current: CurrentGeometry::new(geometry),
            save_path: None,
        }
    }

    /// Where `-sq` writes the model parameters.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    pub const fn current(&self) -> &CurrentGeometry {
        &self.current
    }

    /// Run the menu, then the command prompt until `-q`, `-sq` or end of input.
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        self.menu()?;

        loop {
            write!(self.output, ">> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(self.end(false));
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Step::Quit { saved } = self.execute(&line)? {
                return Ok(self.end(saved));
            }
        }
    }

    fn end(&self, saved: bool) -> SessionEnd {
        SessionEnd {
            geometry: *self.current.get(),
            saved,
        }
    }

    fn execute(&mut self, line: &str) -> io::Result<Step> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(Step::Continue);
            }
        };
        tracing::debug!(?command, version = self.current.version(), "executing");

        match command {
            Command::Inverse(target) => {
                writeln!(self.output, "Inverse kinematics")?;
                match inverse_kinematics(target, self.current.get()) {
                    Ok(angles) => writeln!(self.output, "{}", format_angles(&angles))?,
                    Err(e) => self.report(e)?,
                }
            }
            Command::Forward(angles) => {
                writeln!(self.output, "Forward kinematics")?;
                match forward_kinematics(angles, self.current.get()) {
                    Ok(point) => writeln!(self.output, "{}", format_point(&point))?,
                    Err(e) => self.report(e)?,
                }
            }
            Command::Menu => {
                writeln!(self.output, "\n")?;
                self.menu()?;
            }
            Command::Quit => return Ok(Step::Quit { saved: false }),
            Command::SaveAndQuit => {
                if self.save()? {
                    return Ok(Step::Quit { saved: true });
                }
            }
        }
        Ok(Step::Continue)
    }

    fn report(&mut self, err: KinematicsError) -> io::Result<()> {
        if err.is_unreachable() {
            writeln!(self.output, "no solution")
        } else {
            writeln!(self.output, "{err}")
        }
    }

    /// Returns whether the parameters were written.
    fn save(&mut self) -> io::Result<bool> {
        let Some(path) = self.save_path.clone() else {
            writeln!(self.output, "no configuration file to save to")?;
            return Ok(false);
        };
        match self.current.get().to_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "model parameters saved");
                writeln!(self.output, "model parameters saved to {}", path.display())?;
                Ok(true)
            }
            Err(e) => {
                writeln!(self.output, "failed to save model parameters: {e}")?;
                Ok(false)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Menu
    // -----------------------------------------------------------------------

    fn menu(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}\nChoice: ")?;
            self.output.flush()?;
            let choice = self.read_line()?.map(|l| l.trim().to_string());
            writeln!(self.output, "\n")?;

            match choice.as_deref() {
                Some("1") => {
                    writeln!(self.output, "Current model parameters:")?;
                    writeln!(self.output, "{}\n\n", format_parameters(self.current.get()))?;
                }
                Some("2") => self.edit_parameters()?,
                Some("3") => {
                    writeln!(self.output, "Commands list:")?;
                    writeln!(self.output, "{}\n\n", format_commands())?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn edit_parameters(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "New model parameters (negative or empty keeps the current value):"
        )?;
        let base = self.prompt_length("Base length")?;
        let effector = self.prompt_length("End effector length")?;
        let lower_arm = self.prompt_length("Lower arm length")?;
        let upper_arm = self.prompt_length("Upper arm length")?;

        let update = GeometryUpdate::from_entries(base, effector, upper_arm, lower_arm);
        if update.is_empty() {
            writeln!(self.output, "parameters unchanged")?;
            return writeln!(self.output, "\n");
        }
        match self.current.get().with_update(update) {
            Ok(next) => {
                self.current.replace(next);
                tracing::debug!(version = self.current.version(), ?next, "geometry replaced");
            }
            Err(e) => writeln!(self.output, "parameters unchanged: {e}")?,
        }
        writeln!(self.output, "\n")
    }

    /// Read one length. Empty, negative or unparseable input maps to `-1.0`
    /// (keep current).
    fn prompt_length(&mut self, label: &str) -> io::Result<f64> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(-1.0);
        };
        let entry = line.trim();
        if entry.is_empty() {
            return Ok(-1.0);
        }
        match parse_number(entry) {
            Ok(value) => Ok(value),
            Err(e) => {
                writeln!(self.output, "{e}, keeping current value")?;
                Ok(-1.0)
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
