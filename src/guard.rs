use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::config::GuardConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

/// How the repository status text is turned into a go/no-go decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardPolicy {
    /// Proceed unless the status shows both unstaged and staged changes.
    #[default]
    Legacy,
    /// Proceed only when the status shows neither.
    Strict,
}

/// Pending work found in the repository status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChanges {
    pub unstaged: bool,
    pub uncommitted: bool,
}

impl PendingChanges {
    pub fn scan(status: &str, config: &GuardConfig) -> Self {
        PendingChanges {
            unstaged: status.contains(&config.unstaged_marker),
            uncommitted: status.contains(&config.uncommitted_marker),
        }
    }
}

impl fmt::Display for PendingChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.unstaged, self.uncommitted) {
            (true, true) => write!(f, "unstaged and uncommitted changes"),
            (true, false) => write!(f, "unstaged changes"),
            (false, true) => write!(f, "uncommitted changes"),
            (false, false) => write!(f, "no pending changes"),
        }
    }
}

/// Outcome of the pre-dispatch check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Proceed,
    Blocked(PendingChanges),
}

impl GuardPolicy {
    pub fn evaluate(self, pending: PendingChanges) -> GuardVerdict {
        let proceed = match self {
            GuardPolicy::Legacy => !pending.unstaged || !pending.uncommitted,
            GuardPolicy::Strict => !pending.unstaged && !pending.uncommitted,
        };

        if proceed {
            GuardVerdict::Proceed
        } else {
            GuardVerdict::Blocked(pending)
        }
    }
}

/// Decides whether dispatch may run given the output of the status command.
pub fn check_status(status: &str, config: &GuardConfig) -> GuardVerdict {
    let pending = PendingChanges::scan(status, config);
    log::debug!("repository status: {}", pending);
    config.policy.evaluate(pending)
}

/// Runs the status command and checks its text.
///
/// Stdout and stderr are both inspected and the exit status is ignored, so a
/// working directory outside any repository simply shows no markers.
pub fn probe(
    runner: &dyn CommandRunner,
    workdir: &Path,
    config: &GuardConfig,
) -> Result<GuardVerdict> {
    let status = Invocation::from_command_line(&config.status_command, workdir)?;
    let output = runner.run(&status)?;
    Ok(check_status(&output.combined(), config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CommandOutput, MockRunner};

    const BOTH: &str = "On branch main\n\
        Changes to be committed:\n  modified: a.py\n\n\
        Changes not staged for commit:\n  modified: b.py\n";
    const STAGED_ONLY: &str = "On branch main\nChanges to be committed:\n  modified: a.py\n";
    const UNSTAGED_ONLY: &str = "On branch main\nChanges not staged for commit:\n  modified: b.py\n";
    const CLEAN: &str = "On branch main\nnothing to commit, working tree clean\n";

    fn with_policy(policy: GuardPolicy) -> GuardConfig {
        GuardConfig {
            policy,
            ..GuardConfig::default()
        }
    }

    #[test]
    fn test_legacy_blocks_only_when_both_markers_present() {
        let config = with_policy(GuardPolicy::Legacy);
        assert!(matches!(
            check_status(BOTH, &config),
            GuardVerdict::Blocked(_)
        ));
        assert_eq!(check_status(STAGED_ONLY, &config), GuardVerdict::Proceed);
        assert_eq!(check_status(UNSTAGED_ONLY, &config), GuardVerdict::Proceed);
        assert_eq!(check_status(CLEAN, &config), GuardVerdict::Proceed);
    }

    #[test]
    fn test_strict_blocks_when_either_marker_present() {
        let config = with_policy(GuardPolicy::Strict);
        assert!(matches!(
            check_status(BOTH, &config),
            GuardVerdict::Blocked(_)
        ));
        assert!(matches!(
            check_status(STAGED_ONLY, &config),
            GuardVerdict::Blocked(_)
        ));
        assert!(matches!(
            check_status(UNSTAGED_ONLY, &config),
            GuardVerdict::Blocked(_)
        ));
        assert_eq!(check_status(CLEAN, &config), GuardVerdict::Proceed);
    }

    #[test]
    fn test_outside_repository_proceeds() {
        let status = "fatal: not a git repository (or any of the parent directories): .git\n";
        assert_eq!(
            check_status(status, &with_policy(GuardPolicy::Strict)),
            GuardVerdict::Proceed
        );
    }

    #[test]
    fn test_pending_changes_display() {
        let config = GuardConfig::default();
        assert_eq!(
            PendingChanges::scan(BOTH, &config).to_string(),
            "unstaged and uncommitted changes"
        );
        assert_eq!(
            PendingChanges::scan(CLEAN, &config).to_string(),
            "no pending changes"
        );
    }

    #[test]
    fn test_policy_from_toml() {
        let config: GuardConfig = toml::from_str("policy = \"strict\"").unwrap();
        assert_eq!(config.policy, GuardPolicy::Strict);
    }

    #[test]
    fn test_status_command_reads_stdout_and_stderr() {
        let runner = MockRunner::new();
        runner.respond(
            "git status",
            CommandOutput {
                code: Some(0),
                stdout: STAGED_ONLY.to_string(),
                stderr: String::new(),
            },
        );
        let config = with_policy(GuardPolicy::Strict);
        let verdict = probe(&runner, Path::new("."), &config).unwrap();
        assert!(matches!(verdict, GuardVerdict::Blocked(p) if p.uncommitted && !p.unstaged));
        assert_eq!(runner.calls(), vec!["git status"]);
    }

    #[test]
    fn test_status_command_exit_status_is_ignored() {
        let runner = MockRunner::new();
        runner.respond(
            "git status",
            CommandOutput::failure(128, "fatal: not a git repository\n"),
        );
        let verdict = probe(&runner, Path::new("."), &GuardConfig::default()).unwrap();
        assert_eq!(verdict, GuardVerdict::Proceed);
    }
}
