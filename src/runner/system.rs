use std::fs::File;
use std::process::{Command, Stdio};

use crate::error::{ReleaseError, Result};
use crate::runner::{CommandOutput, CommandRunner, Invocation, StdoutTarget};

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        log::debug!("running `{}` in {}", invocation, invocation.cwd.display());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(&invocation.cwd);

        let spawn_error = |source| ReleaseError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let output = match &invocation.stdout {
            StdoutTarget::Inherit => {
                let status = cmd.status().map_err(spawn_error)?;
                CommandOutput {
                    code: status.code(),
                    ..CommandOutput::default()
                }
            }
            StdoutTarget::File(path) => {
                // Only stdout is redirected; prompts and warnings stay on the terminal.
                let file = File::create(path).map_err(|e| ReleaseError::io(path, e))?;
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::from(file))
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                CommandOutput {
                    code: status.code(),
                    ..CommandOutput::default()
                }
            }
            StdoutTarget::Capture => {
                let output = cmd.output().map_err(spawn_error)?;
                CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
        };

        log::debug!("`{}` exited with {:?}", invocation.program, output.code);
        Ok(output)
    }
}
