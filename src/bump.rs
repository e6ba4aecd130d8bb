//! Version bump orchestration
//!
//! Drives the external version bumper, and when it reports a releasable
//! increment, stages the bumped files, hands over to the release tool and
//! pushes the result:
//!
//! 1. bumper (stdout captured to a temporary file)
//! 2. increment detection from the captured output
//! 3. `git add`, previous tag lookup, release tool, `git push --follow-tags`
//! 4. removal of the temporary file, whatever happened before

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::{Config, ReleaseConfig};
use crate::error::{ReleaseError, Result};
use crate::git::Git;
use crate::increment::{read_increment, ReleaseIncrement};
use crate::project::load_version_files;
use crate::runner::{CommandRunner, Invocation};
use crate::ui;

/// Stand-in for the previous tag in a repository without tags.
pub const NO_PREVIOUS_TAG: &str = "(none)";

/// How a bump run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// The bumper found nothing to release.
    NoIncrement,
    /// Files were staged, the release tool ran and everything was pushed.
    Released {
        increment: ReleaseIncrement,
        previous_tag: Option<String>,
    },
    /// Dry run: the commands that would have run after the bumper.
    Planned {
        increment: ReleaseIncrement,
        commands: Vec<String>,
    },
    /// The bumper's answer was missing or not an increment kind.
    Unrecognized { raw: String },
}

/// Runs the whole bump procedure in `workdir`.
///
/// With `dry_run` the bumper gets its dry-run arguments and nothing after
/// the increment detection is executed; the planned commands are returned
/// instead.
///
/// # Returns
/// * `Ok(BumpOutcome)` - Including the no-increment and unrecognized cases
/// * `Err` - If the temporary file, the project document, or any command
///   after the bumper fails
pub fn run_bump(
    runner: &dyn CommandRunner,
    workdir: &Path,
    config: &Config,
    dry_run: bool,
) -> Result<BumpOutcome> {
    let capture = tempfile::Builder::new()
        .prefix(&config.bump.output_prefix)
        .suffix(".txt")
        .tempfile_in(workdir)
        .map_err(|e| ReleaseError::io(workdir, e))?;
    let capture_path = capture.path().to_path_buf();

    let result = bump_and_release(runner, workdir, config, dry_run, &capture_path);

    match capture.close() {
        Ok(()) => log::debug!("removed {}", capture_path.display()),
        Err(e) => log::warn!("could not remove {}: {}", capture_path.display(), e),
    }

    result
}

fn bump_and_release(
    runner: &dyn CommandRunner,
    workdir: &Path,
    config: &Config,
    dry_run: bool,
    capture: &Path,
) -> Result<BumpOutcome> {
    ui::display_progress("Attempting to bump the version ...");

    let mut bump = Invocation::from_command_line(&config.bump.command, workdir)?;
    if dry_run {
        bump = bump.args(config.bump.dry_run_args.iter().cloned());
    }
    let output = runner.run(&bump.stdout_to(capture))?;
    if !output.is_success() {
        log::warn!("bumper exited with {:?}", output.code);
    }

    let captured = File::open(capture).map_err(|e| ReleaseError::io(capture, e))?;
    let raw = read_increment(BufReader::new(captured), &config.bump.marker)
        .map_err(|e| ReleaseError::io(capture, e))?;
    ui::display_status(&format!("bump result: {}", raw));

    match ReleaseIncrement::parse(&raw) {
        Some(ReleaseIncrement::None) => Ok(BumpOutcome::NoIncrement),
        Some(increment) => release(runner, workdir, config, increment, dry_run),
        None => Ok(BumpOutcome::Unrecognized { raw }),
    }
}

fn release(
    runner: &dyn CommandRunner,
    workdir: &Path,
    config: &Config,
    increment: ReleaseIncrement,
    dry_run: bool,
) -> Result<BumpOutcome> {
    ui::display_success("Looks like the bump worked!");

    let mut files = config.stage.extra_files.clone();
    files.extend(load_version_files(
        &workdir.join(&config.stage.project_file),
        &config.stage.version_files_key,
    )?);

    let git = Git::new(runner, config.stage.git.clone(), workdir);

    if !dry_run {
        git.add(&files)?;
    }

    ui::display_progress("Retrieving the tag we're bumping from ...");
    let previous_tag = git.latest_tag()?;
    if previous_tag.is_none() {
        log::warn!("no tags found, using '{}' as previous tag", NO_PREVIOUS_TAG);
    }

    let release = release_invocation(
        &config.release,
        workdir,
        increment,
        previous_tag.as_deref().unwrap_or(NO_PREVIOUS_TAG),
    )?;

    if dry_run {
        let push = git.push_invocation(&config.push.remote, &config.push.branch);
        return Ok(BumpOutcome::Planned {
            increment,
            commands: vec![
                git.add_invocation(&files).to_string(),
                release.to_string(),
                push.to_string(),
            ],
        });
    }

    ui::display_success("Now handing over to the release tool ...");
    runner.run_checked(&release)?;
    git.push_follow_tags(&config.push.remote, &config.push.branch)?;

    Ok(BumpOutcome::Released {
        increment,
        previous_tag,
    })
}

/// Renders the release commit message, leaving the release tool's own
/// placeholders untouched.
pub fn commit_message(template: &str, previous_tag: &str) -> String {
    template.replace("{previous_tag}", previous_tag)
}

fn release_invocation(
    config: &ReleaseConfig,
    workdir: &Path,
    increment: ReleaseIncrement,
    previous_tag: &str,
) -> Result<Invocation> {
    Ok(Invocation::from_command_line(&config.command, workdir)?
        .arg(config.release_as_flag.clone())
        .arg(increment.as_str())
        .arg(config.message_flag.clone())
        .arg(commit_message(&config.commit_message, previous_tag))
        .inherit_stdout())
}
