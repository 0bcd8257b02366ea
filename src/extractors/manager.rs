//! ExtractorManager - Public API for model extraction
//!
//! Handles language detection and parsing, then delegates to the Python
//! extractor. Batch entry points fan files out over the rayon worker pool; every
//! file is independent, so one file's failure never affects another.

use crate::extractors::base::{ExtractError, ExtractionConfig, ExtractionResults};
use crate::extractors::python::PythonExtractor;
use crate::language::{detect_language_from_path, get_tree_sitter_language};
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tree_sitter::{Parser, Tree};

/// Outcome of extracting one file in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFileResult {
    pub path: String,
    /// Blake3 hash of the content, empty when the file could not be read
    pub hash: String,
    pub size: usize,
    pub results: Option<ExtractionResults>,
    pub error: Option<String>,
}

impl BatchFileResult {
    pub fn success(path: String, content: &str, results: ExtractionResults) -> Self {
        BatchFileResult {
            path,
            hash: hash_content(content),
            size: content.len(),
            results: Some(results),
            error: None,
        }
    }

    pub fn failure(path: String, content: Option<&str>, error: &anyhow::Error) -> Self {
        BatchFileResult {
            path,
            hash: content.map(hash_content).unwrap_or_default(),
            size: content.map(str::len).unwrap_or(0),
            results: None,
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Concatenate the results of every successful file in a batch
pub fn combine_batch(batch: &[BatchFileResult]) -> ExtractionResults {
    ExtractionResults::combine(batch.iter().filter_map(|file| file.results.clone()))
}

/// Blake3 hash of file content as lowercase hex
pub fn hash_content(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Manager for model extraction
pub struct ExtractorManager {
    config: ExtractionConfig,
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Get supported languages
    pub fn supported_languages(&self) -> Vec<&'static str> {
        vec!["python"]
    }

    /// Extract class and function models from file content
    pub fn extract_models(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<ExtractionResults, anyhow::Error> {
        let tree = self.parse(file_path, content)?;

        let mut extractor =
            PythonExtractor::new(file_path.to_string(), content.to_string(), self.config.clone());
        let results = extractor.extract_models(&tree);

        tracing::debug!(
            "Extracted {} classes, {} functions, {} diagnostics from {}",
            results.classes.len(),
            results.functions.len(),
            results.diagnostics.len(),
            file_path
        );
        Ok(results)
    }

    /// Read a file from disk and extract its models
    pub fn extract_file(&self, path: &Path) -> Result<ExtractionResults, anyhow::Error> {
        let content = read_source(path)?;
        self.extract_models(&path.to_string_lossy(), &content)
    }

    /// Extract many `(file_path, content)` pairs in parallel, preserving input order
    pub fn extract_files_batch(&self, files: &[(String, String)]) -> Vec<BatchFileResult> {
        files
            .par_iter()
            .map(|(file_path, content)| match self.extract_models(file_path, content) {
                Ok(results) => BatchFileResult::success(file_path.clone(), content, results),
                Err(error) => {
                    tracing::warn!("Failed to extract models from {}: {:#}", file_path, error);
                    BatchFileResult::failure(file_path.clone(), Some(content), &error)
                }
            })
            .collect()
    }

    /// Read and extract many files in parallel; reading happens inside the worker pool
    pub fn extract_paths(&self, paths: &[PathBuf]) -> Vec<BatchFileResult> {
        paths
            .par_iter()
            .map(|path| {
                let file_path = path.to_string_lossy().replace('\\', "/");
                let content = match read_source(path) {
                    Ok(content) => content,
                    Err(error) => {
                        tracing::warn!("Failed to read {}: {:#}", file_path, error);
                        return BatchFileResult::failure(file_path, None, &error);
                    }
                };
                match self.extract_models(&file_path, &content) {
                    Ok(results) => BatchFileResult::success(file_path, &content, results),
                    Err(error) => {
                        tracing::warn!("Failed to extract models from {}: {:#}", file_path, error);
                        BatchFileResult::failure(file_path, Some(&content), &error)
                    }
                }
            })
            .collect()
    }

    fn parse(&self, file_path: &str, content: &str) -> Result<Tree, anyhow::Error> {
        let language = detect_language_from_path(file_path).ok_or_else(|| {
            ExtractError::UnsupportedLanguage {
                path: file_path.to_string(),
            }
        })?;

        let mut parser = Parser::new();
        let tree_sitter_language = get_tree_sitter_language(language)?;
        parser
            .set_language(&tree_sitter_language)
            .map_err(ExtractError::from)
            .with_context(|| format!("Failed to set parser language for {}", language))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ExtractError::Parse {
                path: file_path.to_string(),
            })?;
        Ok(tree)
    }
}

fn read_source(path: &Path) -> Result<String, anyhow::Error> {
    std::fs::read_to_string(path).map_err(|source| {
        ExtractError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}
