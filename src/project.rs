//! Reading the list of bumped files out of the project document.

use std::fs;
use std::path::Path;

use toml::Value;

use crate::error::{ReleaseError, Result};

/// Loads the ordered version file list stored under `key` in a TOML document.
///
/// `key` is a dotted path such as `tool.commitizen.version_files`. Entries
/// written as `path:pattern` (commitizen's syntax for pointing at a specific
/// line) are reduced to `path`.
///
/// # Returns
/// * `Ok(Vec<String>)` - File paths in document order
/// * `Err` - If the document cannot be read or parsed, the key is missing,
///   or the value is not an array of strings
pub fn load_version_files(document: &Path, key: &str) -> Result<Vec<String>> {
    let content = fs::read_to_string(document).map_err(|e| ReleaseError::io(document, e))?;
    let value: Value = toml::from_str(&content).map_err(|source| ReleaseError::Toml {
        path: document.to_path_buf(),
        source,
    })?;
    version_files_from_value(&value, key, document)
}

fn version_files_from_value(root: &Value, key: &str, document: &Path) -> Result<Vec<String>> {
    let field = key
        .split('.')
        .try_fold(root, |value, segment| value.get(segment))
        .ok_or_else(|| ReleaseError::missing_field(key, document))?;

    let entries = field.as_array().ok_or_else(|| {
        ReleaseError::config(format!("'{}' in {} is not an array", key, document.display()))
    })?;

    entries
        .iter()
        .map(|entry| {
            entry.as_str().map(strip_pattern).ok_or_else(|| {
                ReleaseError::config(format!(
                    "'{}' in {} must only contain strings",
                    key,
                    document.display()
                ))
            })
        })
        .collect()
}

fn strip_pattern(entry: &str) -> String {
    match entry.split_once(':') {
        Some((path, _pattern)) => path.to_string(),
        None => entry.to_string(),
    }
}
