//! External command boundary.
//!
//! Every git and GitHub CLI call made by acp goes through the
//! [`CommandRunner`] trait, so the workflow can be driven by a scripted
//! runner in tests instead of the real tools.
//!
//! - [`SystemRunner`] - runs real processes
//! - [`interactive`] - terminal passthrough with filtered stderr

mod interactive;

use std::io;
use std::process::Command;

use tracing::{debug, trace};

use crate::error::{AcpError, Result};

pub use interactive::is_remote_noise;

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Stdout with surrounding whitespace removed.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// The most useful error text: stderr, or stdout when stderr is empty.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs external programs on behalf of the workflow.
pub trait CommandRunner {
    /// Run a program to completion, capturing stdout and stderr.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run a program that may prompt the user (commit and push hooks).
    ///
    /// The child reads the terminal's stdin and writes its stdout directly.
    /// Stderr is captured, with server noise filtered before it is echoed.
    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by real processes.
///
/// Commands run in the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, program: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        trace!(cmd = %format_command(program, args), "running command");

        let output = self
            .command(program, args)
            .output()
            .map_err(|e| spawn_error(program, e))?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        debug!(
            cmd = %format_command(program, args),
            status = ?result.status,
            "command finished"
        );

        Ok(result)
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        trace!(cmd = %format_command(program, args), "running interactive command");

        let result = interactive::run_passthrough(self.command(program, args))
            .map_err(|e| spawn_error(program, e))?;

        debug!(
            cmd = %format_command(program, args),
            status = ?result.status,
            "interactive command finished"
        );

        Ok(result)
    }
}

/// Render a command line for logs and error messages.
pub fn format_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn spawn_error(program: &str, e: io::Error) -> AcpError {
    if e.kind() == io::ErrorKind::NotFound {
        AcpError::CommandNotFound(program.to_string())
    } else {
        AcpError::Io(e)
    }
}
