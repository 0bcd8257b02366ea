// Fatal per-file errors
//
// Conditions inside a parsed file are diagnostics (see `diagnostics.rs`); the
// errors here stop work on one file, or one output, and nothing else.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type for '{path}' (supported: .py, .pyi)")]
    UnsupportedLanguage { path: String },

    #[error("failed to set parser language: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse {path}")]
    Parse { path: String },

    #[error("invalid configuration in {origin}: {source}")]
    Config {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("no Python files found in the provided directories and files")]
    NoInputFiles,

    #[error("unknown output format '{format}' (expected text, typescript, mermaid or json)")]
    UnknownFormat { format: String },

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output to {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
