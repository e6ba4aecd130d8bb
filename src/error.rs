use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for release-helper operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Missing field '{key}' in {}", .path.display())]
    MissingField { key: String, path: PathBuf },
}

/// Convenience type alias for Results in release-helper
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ReleaseError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn missing_field(key: impl Into<String>, path: impl AsRef<Path>) -> Self {
        ReleaseError::MissingField {
            key: key.into(),
            path: path.as_ref().to_path_buf(),
        }
    }
}
