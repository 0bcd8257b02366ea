// API Functions - PyO3-exposed functions for Python

use super::{PyBatchFileResult, PyExtractionResults};
use crate::extractors::base::{ExtractionConfig, ExtractionResults};
use crate::extractors::manager::{self, ExtractorManager};
use crate::language::detect_language_from_path;
use crate::render::{self as renderer, OutputFormat};
use crate::utils::collect_python_files;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::{Path, PathBuf};

fn value_error(error: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(format!("{:#}", error))
}

/// Build a manager from inline JSON config, a config file, or the defaults
fn manager_for(config_json: Option<&str>, config_path: Option<&str>) -> PyResult<ExtractorManager> {
    let config = match (config_json, config_path) {
        (Some(json), _) => ExtractionConfig::from_json_str(json).map_err(value_error)?,
        (None, Some(path)) => ExtractionConfig::load(Path::new(path)).map_err(value_error)?,
        (None, None) => ExtractionConfig::default(),
    };
    Ok(ExtractorManager::with_config(config))
}

/// Extract class and function models from Python source
///
/// Args:
///     content (str): Source code
///     file_path (str): File path (.py or .pyi), recorded in the results
///     config_json (str | None): Inline JSON extraction config
///     config_path (str | None): Path to a JSON extraction config
///
/// Returns:
///     ExtractionResults: classes, module functions and diagnostics
///
/// Raises:
///     ValueError: If the file type is unsupported or the config is invalid
#[pyfunction]
#[pyo3(signature = (content, file_path, config_json = None, config_path = None))]
pub fn extract_file(
    content: &str,
    file_path: &str,
    config_json: Option<&str>,
    config_path: Option<&str>,
) -> PyResult<PyExtractionResults> {
    let manager = manager_for(config_json, config_path)?;
    let results = manager
        .extract_models(file_path, content)
        .map_err(|e| PyValueError::new_err(format!("Extraction failed: {:#}", e)))?;

    Ok(PyExtractionResults::from_extraction_results(results))
}

/// Extract models from many in-memory files in parallel
///
/// Releases the GIL while the rayon pool works. Failures are reported per file
/// and never fail the batch.
///
/// Args:
///     files (list[tuple[str, str]]): (file_path, content) pairs
///
/// Returns:
///     list[BatchFileResult]: One result per input, in input order
#[pyfunction]
#[pyo3(signature = (files, config_json = None, config_path = None))]
pub fn extract_files_batch(
    py: Python<'_>,
    files: Vec<(String, String)>,
    config_json: Option<&str>,
    config_path: Option<&str>,
) -> PyResult<Vec<PyBatchFileResult>> {
    let manager = manager_for(config_json, config_path)?;

    // Release GIL for parallel processing
    let batch = py.detach(move || manager.extract_files_batch(&files));

    Ok(batch.into_iter().map(PyBatchFileResult::from).collect())
}

/// Read and extract files from disk in parallel
///
/// File I/O happens in the worker pool, not in Python.
#[pyfunction]
#[pyo3(signature = (paths, config_json = None, config_path = None))]
pub fn extract_paths(
    py: Python<'_>,
    paths: Vec<String>,
    config_json: Option<&str>,
    config_path: Option<&str>,
) -> PyResult<Vec<PyBatchFileResult>> {
    let manager = manager_for(config_json, config_path)?;
    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();

    let batch = py.detach(move || manager.extract_paths(&paths));

    Ok(batch.into_iter().map(PyBatchFileResult::from).collect())
}

/// Collect Python files from directories (recursively) and explicit files
///
/// Raises:
///     ValueError: If a path does not exist or no Python files were found
#[pyfunction]
#[pyo3(signature = (dirs = Vec::new(), files = Vec::new(), ignore = Vec::new()))]
pub fn collect_files(dirs: Vec<String>, files: Vec<String>, ignore: Vec<String>) -> PyResult<Vec<String>> {
    let dirs: Vec<PathBuf> = dirs.into_iter().map(PathBuf::from).collect();
    let files: Vec<PathBuf> = files.into_iter().map(PathBuf::from).collect();

    let found = collect_python_files(&dirs, &files, &ignore).map_err(value_error)?;
    Ok(found
        .iter()
        .map(|path| path.to_string_lossy().replace('\\', "/"))
        .collect())
}

/// Combine results and render them, optionally writing to a file
///
/// Args:
///     results (list[ExtractionResults]): Results to combine, in order
///     format (str): "text", "typescript", "mermaid" or "json"
///     output (str | None): Write the rendering to this path as well
///
/// Returns:
///     str: The rendered text
#[pyfunction]
#[pyo3(signature = (results, format = "text", output = None))]
pub fn render(
    results: Vec<PyRef<'_, PyExtractionResults>>,
    format: &str,
    output: Option<&str>,
) -> PyResult<String> {
    let format: OutputFormat = format.parse().map_err(value_error)?;
    let combined = ExtractionResults::combine(results.iter().map(|r| r.inner().clone()));

    let text = renderer::render(&combined, format).map_err(value_error)?;
    if let Some(path) = output {
        renderer::write_output(Some(Path::new(path)), &text).map_err(value_error)?;
    }
    Ok(text)
}

/// Detect the language from a file path
///
/// Returns:
///     str | None: "python" for .py/.pyi files, None otherwise
#[pyfunction]
#[pyo3(signature = (file_path))]
pub fn detect_language(file_path: &str) -> Option<String> {
    detect_language_from_path(file_path).map(str::to_string)
}

#[pyfunction]
pub fn supported_languages() -> Vec<String> {
    ExtractorManager::new()
        .supported_languages()
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

/// Blake3 hash of a content string as a 64-character hex digest
#[pyfunction]
pub fn hash_content(content: &str) -> String {
    manager::hash_content(content)
}
