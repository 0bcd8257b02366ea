//! Utilities for handling .pymodelignore file patterns
//!
//! A `.pymodelignore` file in a scanned directory lists paths (relative to that
//! directory) that source discovery should skip.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the per-directory ignore file
pub const IGNORE_FILE_NAME: &str = ".pymodelignore";

/// Load ignore patterns from the `.pymodelignore` file in `directory`
///
/// Empty lines and `#` comments are skipped; a missing file yields no patterns.
///
/// ```text
/// # .pymodelignore
/// migrations/
/// *_pb2.py
/// generated
/// ```
pub fn load_ignore_file(directory: &Path) -> Result<Vec<String>> {
    let ignore_file = directory.join(IGNORE_FILE_NAME);

    if !ignore_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file)
        .with_context(|| format!("Failed to read {}", ignore_file.display()))?;

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!(
        "Loaded {} ignore patterns from {}",
        patterns.len(),
        ignore_file.display()
    );

    Ok(patterns)
}

/// Check a relative Unix-style path against ignore patterns
///
/// - `dir/`: the directory named `dir` (as a whole path component) and everything below it
/// - `*.suffix`: paths ending with `.suffix`
/// - anything else: substring match
pub fn is_ignored_by_pattern(relative_path: &str, patterns: &[String]) -> bool {
    let path = relative_path.replace('\\', "/");
    patterns
        .iter()
        .any(|pattern| matches_pattern(&path, pattern))
}

fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(dir_name) = pattern.strip_suffix('/') {
        return path
            .split('/')
            .any(|component| component == dir_name);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return path.ends_with(suffix);
    }
    path.contains(pattern)
}
