use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::runner::{CommandRunner, Invocation};

/// Git commands used by the release procedures, run through a [CommandRunner].
///
/// Every method fails when git exits non-zero.
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    workdir: PathBuf,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: impl Into<String>, workdir: &Path) -> Self {
        Git {
            runner,
            program: program.into(),
            workdir: workdir.to_path_buf(),
        }
    }

    fn command(&self) -> Invocation {
        Invocation::new(self.program.clone(), &self.workdir)
    }

    pub fn add_invocation(&self, paths: &[String]) -> Invocation {
        self.command().arg("add").args(paths.iter().cloned())
    }

    /// Stages the given paths with `git add`.
    pub fn add(&self, paths: &[String]) -> Result<()> {
        self.runner.run_checked(&self.add_invocation(paths))?;
        Ok(())
    }

    /// Finds the most recently created tag in the repository.
    ///
    /// Equivalent to `git describe --abbrev=0 --tags $(git rev-list --tags --max-count=1)`.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The tag name
    /// * `Ok(None)` - If the repository has no tags
    /// * `Err` - If either git command fails
    pub fn latest_tag(&self) -> Result<Option<String>> {
        let rev_list = self
            .command()
            .args(["rev-list", "--tags", "--skip=0", "--max-count=1"]);
        let output = self.runner.run_checked(&rev_list)?;
        let commit = output.stdout.trim();
        if commit.is_empty() {
            return Ok(None);
        }

        let describe = self
            .command()
            .args(["describe", "--abbrev=0", "--tags", commit]);
        let output = self.runner.run_checked(&describe)?;
        let tag = output.stdout.trim();
        Ok((!tag.is_empty()).then(|| tag.to_string()))
    }

    pub fn push_invocation(&self, remote: &str, branch: &str) -> Invocation {
        self.command()
            .args(["push", "--follow-tags", remote, branch])
            .inherit_stdout()
    }

    /// Pushes the branch and its annotated tags with `git push --follow-tags`.
    pub fn push_follow_tags(&self, remote: &str, branch: &str) -> Result<()> {
        self.runner.run_checked(&self.push_invocation(remote, branch))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{CommandOutput, MockRunner};

    #[test]
    fn test_add_passes_paths_in_order() {
        let runner = MockRunner::new();
        let git = Git::new(&runner, "git", Path::new("."));
        git.add(&[".cz.toml".to_string(), "backup.sh".to_string()])
            .unwrap();
        assert_eq!(runner.calls(), vec!["git add .cz.toml backup.sh"]);
    }

    #[test]
    fn test_latest_tag_describes_newest_tagged_commit() {
        let runner = MockRunner::new();
        runner.respond("git rev-list", CommandOutput::success("4f2a9c1\n"));
        runner.respond("git describe", CommandOutput::success("v1.4.0\n"));
        let git = Git::new(&runner, "git", Path::new("."));

        assert_eq!(git.latest_tag().unwrap(), Some("v1.4.0".to_string()));
        assert_eq!(
            runner.calls(),
            vec![
                "git rev-list --tags --skip=0 --max-count=1",
                "git describe --abbrev=0 --tags 4f2a9c1",
            ]
        );
    }

    #[test]
    fn test_latest_tag_without_tags() {
        let runner = MockRunner::new();
        let git = Git::new(&runner, "git", Path::new("."));
        assert_eq!(git.latest_tag().unwrap(), None);
        assert!(!runner.was_called("git describe"));
    }

    #[test]
    fn test_push_failure_is_an_error() {
        let runner = MockRunner::new();
        runner.respond("git push", CommandOutput::failure(1, "! [rejected] main -> main"));
        let git = Git::new(&runner, "git", Path::new("."));
        let err = git.push_follow_tags("origin", "main").unwrap_err();
        assert!(err.to_string().contains("git push --follow-tags origin main"));
    }
}
