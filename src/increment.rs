use std::fmt;
use std::io::BufRead;

/// Represents the increment kind reported by the version bumper.
///
/// `None` is a valid answer from the bumper ("nothing to release") and is
/// distinct from output the helper cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseIncrement {
    None,
    Patch,
    Minor,
    Major,
}

impl ReleaseIncrement {
    /// Classifies an already normalized increment string.
    ///
    /// # Returns
    /// * `Some(ReleaseIncrement)` - For `none`, `patch`, `minor` or `major`
    /// * `None` - For anything else, including the empty string
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "none" => Some(ReleaseIncrement::None),
            "patch" => Some(ReleaseIncrement::Patch),
            "minor" => Some(ReleaseIncrement::Minor),
            "major" => Some(ReleaseIncrement::Major),
            _ => None,
        }
    }

    /// Value passed to the release tool's release-as flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseIncrement::None => "none",
            ReleaseIncrement::Patch => "patch",
            ReleaseIncrement::Minor => "minor",
            ReleaseIncrement::Major => "major",
        }
    }

    /// Whether this increment leads to a release.
    pub fn is_release(&self) -> bool {
        !matches!(self, ReleaseIncrement::None)
    }
}

impl fmt::Display for ReleaseIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the raw increment kind from the bumper's output.
///
/// Takes the first line containing `marker`, keeps the text after it, and
/// returns it trimmed and lowercased. Returns an empty string when no line
/// carries the marker.
///
/// # Example
/// ```
/// use release_helper::increment::detect_increment;
///
/// let output = "bump: version 1.2.0 → 2.0.0\nincrement detected: MAJOR\n";
/// assert_eq!(detect_increment(output, "increment detected: "), "major");
/// assert_eq!(detect_increment("nothing here", "increment detected: "), "");
/// ```
pub fn detect_increment(output: &str, marker: &str) -> String {
    output
        .lines()
        .find_map(|line| increment_in_line(line, marker))
        .unwrap_or_default()
}

/// Same as [detect_increment], reading line by line from `reader`.
pub fn read_increment<R: BufRead>(reader: R, marker: &str) -> std::io::Result<String> {
    for line in reader.lines() {
        if let Some(kind) = increment_in_line(&line?, marker) {
            return Ok(kind);
        }
    }
    Ok(String::new())
}

fn increment_in_line(line: &str, marker: &str) -> Option<String> {
    line.find(marker)
        .map(|at| line[at + marker.len()..].trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "increment detected: ";

    #[test]
    fn test_detects_major_regardless_of_case_and_whitespace() {
        assert_eq!(detect_increment("increment detected: MAJOR\n", MARKER), "major");
        assert_eq!(
            detect_increment("   increment detected:   Major  \r\n", MARKER),
            "major"
        );
        assert_eq!(detect_increment("increment detected: major", MARKER), "major");
    }

    #[test]
    fn test_first_matching_line_wins() {
        let output = "bump: version 0.3.1 → 0.4.0\n\
                      tag to create: v0.4.0\n\
                      increment detected: MINOR\n\
                      increment detected: MAJOR\n";
        assert_eq!(detect_increment(output, MARKER), "minor");
    }

    #[test]
    fn test_missing_marker_yields_empty_string() {
        let output = "[NO_COMMITS_FOUND]\nNo new commits found.\n";
        assert_eq!(detect_increment(output, MARKER), "");
        assert_eq!(ReleaseIncrement::parse(""), None);
    }

    #[test]
    fn test_none_is_a_recognized_increment() {
        let kind = detect_increment("increment detected: None\n", MARKER);
        assert_eq!(ReleaseIncrement::parse(&kind), Some(ReleaseIncrement::None));
        assert!(!ReleaseIncrement::None.is_release());
    }

    #[test]
    fn test_unknown_kind_is_unrecognized() {
        let kind = detect_increment("increment detected: PRERELEASE\n", MARKER);
        assert_eq!(kind, "prerelease");
        assert_eq!(ReleaseIncrement::parse(&kind), None);
    }

    #[test]
    fn test_read_increment_from_reader() {
        let reader = std::io::Cursor::new("a\nincrement detected: PATCH\n");
        assert_eq!(read_increment(reader, MARKER).unwrap(), "patch");

        let empty = std::io::Cursor::new("");
        assert_eq!(read_increment(empty, MARKER).unwrap(), "");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for increment in [
            ReleaseIncrement::Patch,
            ReleaseIncrement::Minor,
            ReleaseIncrement::Major,
        ] {
            assert!(increment.is_release());
            assert_eq!(ReleaseIncrement::parse(&increment.to_string()), Some(increment));
        }
    }
}
