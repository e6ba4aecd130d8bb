//! Maps the operation argument onto one of the two release procedures.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::bump::{run_bump, BumpOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::notes::write_release_notes;
use crate::runner::CommandRunner;
use crate::ui;

/// The operations accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Bump,
    Notes,
}

/// An operation name that is neither `bump` nor `notes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bump" => Ok(Operation::Bump),
            "notes" => Ok(Operation::Notes),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// Runs the selected procedure and reports its outcome on the console.
///
/// Informational outcomes (nothing to bump, unrecognized bumper output) are
/// reported and return `Ok`.
pub fn dispatch(
    operation: Operation,
    runner: &dyn CommandRunner,
    workdir: &Path,
    config: &Config,
    dry_run: bool,
) -> Result<()> {
    match operation {
        Operation::Bump => {
            let outcome = run_bump(runner, workdir, config, dry_run)?;
            report_bump(&outcome);
        }
        Operation::Notes => {
            let summary = write_release_notes(workdir, &config.notes)?;
            ui::display_success(&format!(
                "Release notes written to {} ({} lines)",
                summary.output.display(),
                summary.section_lines
            ));
        }
    }
    Ok(())
}

fn report_bump(outcome: &BumpOutcome) {
    match outcome {
        BumpOutcome::NoIncrement => {
            ui::display_warning("No increment detected, cannot bump");
        }
        BumpOutcome::Released {
            increment,
            previous_tag,
        } => {
            ui::display_success(&format!(
                "Released a {} increment from {} and pushed tags",
                increment,
                previous_tag.as_deref().unwrap_or(crate::bump::NO_PREVIOUS_TAG)
            ));
        }
        BumpOutcome::Planned { increment, commands } => {
            ui::display_status(&format!("Would release a {} increment", increment));
            ui::display_plan(commands);
        }
        BumpOutcome::Unrecognized { raw } => {
            log::debug!("unrecognized increment: {:?}", raw);
            ui::display_error("Something went horribly wrong, please figure it out yourself");
            ui::display_error("Bump failed!");
        }
    }
}
