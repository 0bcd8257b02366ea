// Source file discovery
//
// Collects the Python files to extract from a set of directories (searched
// recursively) and explicitly named files, and converts paths to the relative
// Unix-style form used in results.

use crate::extractors::base::ExtractError;
use crate::language::detect_language_from_path;
use crate::utils::ignore::{is_ignored_by_pattern, load_ignore_file};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions searched for inside directories
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Convert a path below `root` to a relative Unix-style path (`/` separators)
///
/// Paths outside `root` are returned whole, with separators normalized.
pub fn to_relative_unix_style(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Collect Python source files from directories and explicit files
///
/// Directories are searched recursively for `.py` and `.pyi` files, minus
/// anything matched by `ignore_patterns` or by the directory's `.pymodelignore`.
/// Explicit files that are not Python are skipped with a warning. The result is
/// sorted and free of duplicates.
///
/// Fails when an explicit file or directory does not exist, or when nothing is found.
pub fn collect_python_files(
    dirs: &[PathBuf],
    files: &[PathBuf],
    ignore_patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for dir in dirs {
        if !dir.is_dir() {
            return Err(ExtractError::FileNotFound { path: dir.clone() }.into());
        }

        let mut patterns = ignore_patterns.to_vec();
        patterns.extend(load_ignore_file(dir)?);

        for path in glob_python_files(dir)? {
            let relative = to_relative_unix_style(&path, dir);
            if is_ignored_by_pattern(&relative, &patterns) {
                debug!("Ignoring {}", path.display());
                continue;
            }
            found.insert(path);
        }
    }

    for file in files {
        if !file.is_file() {
            return Err(ExtractError::FileNotFound { path: file.clone() }.into());
        }
        match file.to_str().and_then(detect_language_from_path) {
            Some(_) => {
                found.insert(file.clone());
            }
            None => warn!("Skipping non-Python file {}", file.display()),
        }
    }

    if found.is_empty() {
        return Err(ExtractError::NoInputFiles.into());
    }

    debug!("Collected {} Python files", found.len());
    Ok(found.into_iter().collect())
}

fn glob_python_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let mut paths = Vec::new();

    for extension in PYTHON_EXTENSIONS {
        let pattern = format!("{}/**/*.{}", escaped.trim_end_matches('/'), extension);
        let entries = glob::glob(&pattern)
            .map_err(ExtractError::from)
            .with_context(|| format!("Invalid search pattern for {}", dir.display()))?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(error) => warn!("Skipping unreadable path: {}", error),
            }
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "class Sample:\n    pass\n").unwrap();
        path
    }

    #[test]
    fn test_relative_unix_style() {
        let root = Path::new("/project");
        assert_eq!(
            to_relative_unix_style(Path::new("/project/pkg/models.py"), root),
            "pkg/models.py"
        );
        assert_eq!(
            to_relative_unix_style(Path::new("/elsewhere/a.py"), root),
            "/elsewhere/a.py"
        );
    }

    #[test]
    fn test_collects_recursively_sorted_and_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let models = touch(root, "pkg/models.py");
        let stub = touch(root, "pkg/stubs/api.pyi");
        touch(root, "README.md");

        let found =
            collect_python_files(&[root.to_path_buf()], std::slice::from_ref(&models), &[]).unwrap();

        let mut expected = vec![models, stub];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_ignore_file_and_explicit_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let kept = touch(root, "app/models.py");
        touch(root, "app/migrations/0001_initial.py");
        touch(root, "proto/user_pb2.py");
        fs::write(root.join(".pymodelignore"), "migrations/\n").unwrap();

        let found =
            collect_python_files(&[root.to_path_buf()], &[], &["*_pb2.py".to_string()]).unwrap();
        assert_eq!(found, vec![kept]);
    }

    #[test]
    fn test_missing_file_and_empty_result_are_errors() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let missing = collect_python_files(&[], &[root.join("nope.py")], &[]).unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<ExtractError>(),
            Some(ExtractError::FileNotFound { .. })
        ));

        let empty = collect_python_files(&[root.to_path_buf()], &[], &[]).unwrap_err();
        assert!(matches!(
            empty.downcast_ref::<ExtractError>(),
            Some(ExtractError::NoInputFiles)
        ));
    }

    #[test]
    fn test_explicit_non_python_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let notes = touch(root, "notes.txt");
        let model = touch(root, "model.py");

        let found = collect_python_files(&[], &[notes, model.clone()], &[]).unwrap();
        assert_eq!(found, vec![model]);
    }
}
