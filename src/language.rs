//! Language Support - tree-sitter language configuration
//!
//! Python is the only source language the model extractor understands; this
//! module maps file extensions to it and hands out the grammar.

use anyhow::Result;
use std::path::Path;

/// Get tree-sitter language parser for a given language name
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: python",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "py" | "pyi" => Some("python"),
        _ => None,
    }
}

/// Detect language from a file path's extension
pub fn detect_language_from_path(file_path: &str) -> Option<&'static str> {
    Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}
