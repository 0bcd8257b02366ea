// pymodel core - tree-sitter based class model extraction for Python sources
//
// Usable as a plain Rust library; with the `python` feature it also builds the
// `pymodel_core` extension module.

pub mod extractors;
pub mod language;
pub mod render;
pub mod utils;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use extractors::{
    ClassModel, ExtractError, ExtractionConfig, ExtractionResults, ExtractorManager, FunctionModel,
    TypeHint,
};
pub use language::{detect_language_from_extension, detect_language_from_path};
pub use render::{render, OutputFormat};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// pymodel core Python module
///
/// Extracts class models from Python sources and renders them as text,
/// TypeScript, Mermaid or JSON.
#[cfg(feature = "python")]
#[pymodule]
fn pymodel_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::extract_file, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_files_batch, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_paths, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::collect_files, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::render, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::detect_language, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_languages, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::hash_content, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PyAttribute>()?;
    m.add_class::<bindings::PyParameter>()?;
    m.add_class::<bindings::PyFunctionModel>()?;
    m.add_class::<bindings::PyClassModel>()?;
    m.add_class::<bindings::PyDiagnostic>()?;
    m.add_class::<bindings::PyExtractionResults>()?;
    m.add_class::<bindings::PyBatchFileResult>()?;

    Ok(())
}
