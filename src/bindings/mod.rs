// PyO3 Bindings Module
//
// Python bindings for the model extractor. Model types are wrapped in
// read-only PyO3 classes.

mod api;
mod batch_result;
mod extraction_results;
mod models;

// Re-export for lib.rs
pub use api::{
    collect_files, detect_language, extract_file, extract_files_batch, extract_paths, hash_content,
    render, supported_languages,
};
pub use batch_result::PyBatchFileResult;
pub use extraction_results::PyExtractionResults;
pub use models::{PyAttribute, PyClassModel, PyDiagnostic, PyFunctionModel, PyParameter};
