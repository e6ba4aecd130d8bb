//! External process execution
//!
//! Every tool the helper drives (the version bumper, the release tool, git)
//! is reached through the [CommandRunner] trait, so the procedures can be
//! exercised against a recording mock instead of real processes.
//!
//! - [system::SystemRunner]: spawns real processes with `std::process`
//! - [mock::MockRunner]: records invocations and replays scripted output

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Where a child's standard output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdoutTarget {
    /// Collected into [CommandOutput::stdout].
    Capture,
    /// Written to the given file, truncating it.
    File(PathBuf),
    /// Streamed to the terminal; nothing is collected.
    Inherit,
}

/// A single external command, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub stdout: StdoutTarget,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            stdout: StdoutTarget::Capture,
        }
    }

    /// Builds an invocation from a configured `[program, args...]` list.
    pub fn from_command_line(command: &[String], cwd: impl AsRef<Path>) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ReleaseError::config("command line is empty"))?;
        Ok(Invocation::new(program.clone(), cwd).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdout_to(mut self, path: impl AsRef<Path>) -> Self {
        self.stdout = StdoutTarget::File(path.as_ref().to_path_buf());
        self
    }

    pub fn inherit_stdout(mut self) -> Self {
        self.stdout = StdoutTarget::Inherit;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, the way a shell would show both.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Runs external commands on behalf of the release procedures.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion.
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - The process ran, whatever its exit status
    /// * `Err` - If the process could not be started
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Runs the command and turns a non-zero exit into an error.
    fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let output = self.run(invocation)?;
        if output.is_success() {
            Ok(output)
        } else {
            let stderr = output.stderr.trim();
            Err(ReleaseError::CommandFailed {
                command: invocation.to_string(),
                code: output.code.unwrap_or(-1),
                stderr: if stderr.is_empty() {
                    "see output above".to_string()
                } else {
                    stderr.to_string()
                },
            })
        }
    }
}
