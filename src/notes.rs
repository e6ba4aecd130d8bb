//! Release notes extraction from a changelog.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::NotesConfig;
use crate::error::{ReleaseError, Result};

/// Position of the scan relative to the first release section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeSection,
    InSection,
    Done,
}

/// Collects the lines of the first section delimited by `marker`.
///
/// Marker lines themselves are never returned. Line endings are kept as they
/// appear in the input. With a single marker the section runs to the end of
/// input; with none the result is empty.
pub fn extract_section<R: BufRead>(mut reader: R, marker: &str) -> std::io::Result<Vec<String>> {
    let mut state = ScanState::BeforeSection;
    let mut lines = Vec::new();
    let mut line = String::new();

    while state != ScanState::Done {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let is_marker = line.contains(marker);
        state = match (state, is_marker) {
            (ScanState::BeforeSection, true) => ScanState::InSection,
            (ScanState::InSection, true) => ScanState::Done,
            (ScanState::InSection, false) => {
                lines.push(line.clone());
                ScanState::InSection
            }
            (current, _) => current,
        };
    }

    Ok(lines)
}

/// Joins the heading and the section lines without adding a trailing newline.
pub fn render_notes(heading: &str, section: &[String]) -> String {
    let mut notes = String::with_capacity(
        heading.len() + 1 + section.iter().map(String::len).sum::<usize>(),
    );
    notes.push_str(heading);
    notes.push('\n');
    for line in section {
        notes.push_str(line);
    }
    notes
}

/// Result of a notes extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSummary {
    pub output: PathBuf,
    pub section_lines: usize,
}

/// Extracts the latest release section of the changelog into the output file.
///
/// Relative paths in `config` resolve against `workdir`.
///
/// # Returns
/// * `Ok(NotesSummary)` - Where the notes went and how many lines they hold
/// * `Err` - If the changelog cannot be read or the output cannot be written
///   (for example when its directory does not exist)
pub fn write_release_notes(workdir: &Path, config: &NotesConfig) -> Result<NotesSummary> {
    let changelog = workdir.join(&config.changelog);
    let output = workdir.join(&config.output);

    let file = File::open(&changelog).map_err(|e| ReleaseError::io(&changelog, e))?;
    let section = extract_section(BufReader::new(file), &config.marker)
        .map_err(|e| ReleaseError::io(&changelog, e))?;

    if section.is_empty() {
        log::warn!(
            "no section marked with '{}' found in {}",
            config.marker,
            changelog.display()
        );
    }

    fs::write(&output, render_notes(&config.heading, &section))
        .map_err(|e| ReleaseError::io(&output, e))?;
    log::debug!("wrote {} lines to {}", section.len(), output.display());

    Ok(NotesSummary {
        output,
        section_lines: section.len(),
    })
}
