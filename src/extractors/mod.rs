//! Model extraction
//!
//! Parses Python sources with tree-sitter and builds structural class models:
//! attributes with resolved type hints, method signatures, inheritance and
//! nesting.
//!
//! # Architecture
//!
//! - `base` - model types, the lowered syntax tree, config, diagnostics, errors
//! - `python` - lowering from the tree-sitter CST plus the model builders
//! - `manager` - ExtractorManager public API and batch extraction

pub mod base;
pub mod manager;
pub mod python;

// Re-export the public API
pub use base::{
    Attribute, ClassModel, Diagnostic, DiagnosticKind, ExtractError, ExtractionConfig,
    ExtractionResults, FunctionModel, Parameter, TypeHint,
};
pub use manager::{combine_batch, hash_content, BatchFileResult, ExtractorManager};
pub use python::build_models;
