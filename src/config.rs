use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::guard::GuardPolicy;

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "release-helper.toml";

/// Represents the complete configuration for release-helper.
///
/// Every field defaults to the values the helper has always used, so running
/// without a config file gives the commitizen + standard-version workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub guard: GuardConfig,

    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub stage: StageConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_status_command() -> Vec<String> {
    strings(&["git", "status"])
}

fn default_unstaged_marker() -> String {
    "not staged for commit".to_string()
}

fn default_uncommitted_marker() -> String {
    "to be committed".to_string()
}

/// Settings for the pre-dispatch repository status check.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GuardConfig {
    #[serde(default)]
    pub policy: GuardPolicy,

    #[serde(default = "default_status_command")]
    pub status_command: Vec<String>,

    #[serde(default = "default_unstaged_marker")]
    pub unstaged_marker: String,

    #[serde(default = "default_uncommitted_marker")]
    pub uncommitted_marker: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            policy: GuardPolicy::default(),
            status_command: default_status_command(),
            unstaged_marker: default_unstaged_marker(),
            uncommitted_marker: default_uncommitted_marker(),
        }
    }
}

fn default_bump_command() -> Vec<String> {
    strings(&["cz", "bump", "--files-only"])
}

fn default_increment_marker() -> String {
    "increment detected: ".to_string()
}

fn default_dry_run_args() -> Vec<String> {
    strings(&["--dry-run"])
}

fn default_output_prefix() -> String {
    ".bump_result".to_string()
}

/// Settings for the external semantic-version bumper.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpConfig {
    #[serde(default = "default_bump_command")]
    pub command: Vec<String>,

    /// Text preceding the increment kind in the bumper's output.
    #[serde(default = "default_increment_marker")]
    pub marker: String,

    /// Extra arguments appended to `command` for `--dry-run`.
    #[serde(default = "default_dry_run_args")]
    pub dry_run_args: Vec<String>,

    /// Prefix of the temporary file capturing the bumper's output.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            command: default_bump_command(),
            marker: default_increment_marker(),
            dry_run_args: default_dry_run_args(),
            output_prefix: default_output_prefix(),
        }
    }
}

fn default_git() -> String {
    "git".to_string()
}

fn default_project_file() -> PathBuf {
    PathBuf::from("pyproject.toml")
}

fn default_version_files_key() -> String {
    "tool.commitizen.version_files".to_string()
}

fn default_extra_files() -> Vec<String> {
    strings(&[".cz.toml"])
}

/// Settings controlling which files get staged after a successful bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StageConfig {
    #[serde(default = "default_git")]
    pub git: String,

    /// Project document holding the list of bumped files.
    #[serde(default = "default_project_file")]
    pub project_file: PathBuf,

    /// Dotted path of the version file list inside `project_file`.
    #[serde(default = "default_version_files_key")]
    pub version_files_key: String,

    /// Files always staged ahead of the version files.
    #[serde(default = "default_extra_files")]
    pub extra_files: Vec<String>,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            git: default_git(),
            project_file: default_project_file(),
            version_files_key: default_version_files_key(),
            extra_files: default_extra_files(),
        }
    }
}

fn default_release_command() -> Vec<String> {
    strings(&["standard-version", "--commit-all"])
}

fn default_release_as_flag() -> String {
    "--release-as".to_string()
}

fn default_message_flag() -> String {
    "--releaseCommitMessageFormat".to_string()
}

fn default_commit_message() -> String {
    "bump: ✈️ {previous_tag} → v{{currentTag}}".to_string()
}

/// Settings for the external changelog/tag generator.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_release_command")]
    pub command: Vec<String>,

    #[serde(default = "default_release_as_flag")]
    pub release_as_flag: String,

    #[serde(default = "default_message_flag")]
    pub message_flag: String,

    /// Commit message template. `{previous_tag}` is substituted here;
    /// `{{currentTag}}` is left for the release tool.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            command: default_release_command(),
            release_as_flag: default_release_as_flag(),
            message_flag: default_message_flag(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

/// Where commits and tags get pushed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PushConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        PushConfig {
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_notes_output() -> PathBuf {
    PathBuf::from("../LATEST_RELEASE_NOTES.md")
}

fn default_section_marker() -> String {
    "## [v".to_string()
}

fn default_heading() -> String {
    "## What's changed in this release".to_string()
}

/// Settings for release notes extraction.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    #[serde(default = "default_notes_output")]
    pub output: PathBuf,

    /// Substring identifying a release section heading.
    #[serde(default = "default_section_marker")]
    pub marker: String,

    /// Heading written above the extracted section.
    #[serde(default = "default_heading")]
    pub heading: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            changelog: default_changelog(),
            output: default_notes_output(),
            marker: default_section_marker(),
            heading: default_heading(),
        }
    }
}

impl Config {
    /// Checks the values serde cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        let commands = [
            ("guard.status_command", &self.guard.status_command),
            ("bump.command", &self.bump.command),
            ("release.command", &self.release.command),
        ];
        for (name, command) in commands {
            if command.first().map_or(true, |program| program.is_empty()) {
                return Err(ReleaseError::config(format!(
                    "{} must name a program",
                    name
                )));
            }
        }

        if self.bump.marker.is_empty() {
            return Err(ReleaseError::config("bump.marker must not be empty"));
        }
        if self.notes.marker.is_empty() {
            return Err(ReleaseError::config("notes.marker must not be empty"));
        }
        if self.stage.git.is_empty() {
            return Err(ReleaseError::config("stage.git must name a program"));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-helper.toml` in the working directory
/// 3. `release-helper.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, workdir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(workdir),
    };

    let config = match path {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            let config_str = fs::read_to_string(&path).map_err(|e| ReleaseError::io(&path, e))?;
            toml::from_str::<Config>(&config_str)
                .map_err(|source| ReleaseError::Toml { path, source })?
        }
        None => {
            log::debug!("no configuration file found, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn discover_config(workdir: &Path) -> Option<PathBuf> {
    let local = workdir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historic_workflow() {
        let config = Config::default();
        assert_eq!(config.bump.command, vec!["cz", "bump", "--files-only"]);
        assert_eq!(config.bump.marker, "increment detected: ");
        assert_eq!(config.stage.extra_files, vec![".cz.toml"]);
        assert_eq!(config.push.remote, "origin");
        assert_eq!(config.push.branch, "main");
        assert_eq!(config.notes.marker, "## [v");
        assert_eq!(
            config.notes.output,
            PathBuf::from("../LATEST_RELEASE_NOTES.md")
        );
        assert_eq!(config.guard.policy, GuardPolicy::Legacy);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[push]
branch = "master"
"#,
        )
        .unwrap();
        assert_eq!(config.push.branch, "master");
        assert_eq!(config.push.remote, "origin");
        assert_eq!(config.notes, NotesConfig::default());
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let config: Config = toml::from_str(
            r#"
[release]
command = []
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("release.command"));
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let mut config = Config::default();
        config.notes.marker.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
