//! Console output for the release procedures.
//!
//! Colours follow the helper's long-standing scheme: magenta for a step that
//! starts, green for success, yellow for notices, red for failures.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), style(message).green());
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Announce a step that is about to run external tools.
pub fn display_progress(message: &str) {
    println!("{}", style(message).magenta());
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), style(message).yellow());
}

/// Print the commands a dry run would have executed.
///
/// # Arguments
/// * `commands` - Rendered command lines, in execution order
pub fn display_plan(commands: &[String]) {
    println!("\n{}", style("Dry run, would run:").bold());
    for (i, command) in commands.iter().enumerate() {
        println!("  Step {}: {}", i + 1, style(command).cyan());
    }
}

/// Shown after an unknown operation was given.
pub const USAGE_HINT: &str = "accepted operations: bump | notes\nplease try again";

/// Print the accepted operations after an unknown one was given.
pub fn display_usage_hint() {
    println!("{}", USAGE_HINT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_usage_hint_lists_both_operations() {
        let lines: Vec<&str> = USAGE_HINT.lines().collect();
        assert_eq!(
            lines,
            vec!["accepted operations: bump | notes", "please try again"]
        );
    }

    #[test]
    fn test_display_plan() {
        display_plan(&["git add .cz.toml".to_string()]);
    }
}
