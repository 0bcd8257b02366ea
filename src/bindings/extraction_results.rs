// PyExtractionResults - PyO3 wrapper for ExtractionResults
//
// Container for the classes, module functions and diagnostics of one file
// (or of a combined batch).

use super::{PyClassModel, PyDiagnostic, PyFunctionModel};
use crate::extractors::base::ExtractionResults;
use crate::render::{self, OutputFormat};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Python-accessible ExtractionResults wrapper
#[pyclass(name = "ExtractionResults")]
pub struct PyExtractionResults {
    inner: ExtractionResults,
}

impl PyExtractionResults {
    pub fn from_extraction_results(results: ExtractionResults) -> Self {
        PyExtractionResults { inner: results }
    }

    pub fn inner(&self) -> &ExtractionResults {
        &self.inner
    }
}

#[pymethods]
impl PyExtractionResults {
    #[getter]
    fn file_path(&self) -> String {
        self.inner.file_path.clone()
    }

    #[getter]
    fn classes(&self) -> Vec<PyClassModel> {
        self.inner
            .classes
            .iter()
            .map(|c| PyClassModel::from_class(c.clone()))
            .collect()
    }

    #[getter]
    fn functions(&self) -> Vec<PyFunctionModel> {
        self.inner
            .functions
            .iter()
            .map(|f| PyFunctionModel::from_function(f.clone()))
            .collect()
    }

    #[getter]
    fn diagnostics(&self) -> Vec<PyDiagnostic> {
        self.inner
            .diagnostics
            .iter()
            .map(|d| PyDiagnostic::from_diagnostic(d.clone()))
            .collect()
    }

    /// Render these results ("text", "typescript", "mermaid" or "json")
    #[pyo3(signature = (format = "text"))]
    fn render(&self, format: &str) -> PyResult<String> {
        let format: OutputFormat = format
            .parse()
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
        render::render(&self.inner, format).map_err(|e| PyValueError::new_err(format!("{}", e)))
    }

    fn to_json(&self) -> PyResult<String> {
        self.render("json")
    }

    fn __repr__(&self) -> String {
        format!(
            "ExtractionResults(file_path={:?}, classes={}, functions={}, diagnostics={})",
            self.inner.file_path,
            self.inner.classes.len(),
            self.inner.functions.len(),
            self.inner.diagnostics.len()
        )
    }
}
