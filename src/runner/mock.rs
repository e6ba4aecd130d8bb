use std::fs;
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::runner::{CommandOutput, CommandRunner, Invocation, StdoutTarget};

/// Mock runner for testing without spawning processes
///
/// Responses are matched by prefix against the rendered command line
/// (`program arg1 arg2 ...`); the first registered match wins. Commands
/// without a scripted response succeed with empty output.
pub struct MockRunner {
    responses: Mutex<Vec<(String, CommandOutput)>>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner with no scripted responses
    pub fn new() -> Self {
        MockRunner {
            responses: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the output for commands starting with `prefix`
    pub fn respond(&self, prefix: impl Into<String>, output: CommandOutput) {
        self.lock_responses().push((prefix.into(), output));
    }

    /// Every invocation seen so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock_calls().clone()
    }

    /// Rendered command lines of every invocation, in order
    pub fn calls(&self) -> Vec<String> {
        self.lock_calls().iter().map(|i| i.to_string()).collect()
    }

    /// Whether any recorded command line starts with `prefix`
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(prefix))
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, Vec<(String, CommandOutput)>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<Invocation>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.lock_calls().push(invocation.clone());

        let rendered = invocation.to_string();
        let mut output = self
            .lock_responses()
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::success(""));

        match &invocation.stdout {
            StdoutTarget::File(path) => {
                fs::write(path, &output.stdout).map_err(|e| ReleaseError::io(path, e))?;
                output.stdout.clear();
            }
            StdoutTarget::Inherit => output.stdout.clear(),
            StdoutTarget::Capture => {}
        }

        Ok(output)
    }
}
