// PyBatchFileResult - outcome of one file in a batch
//
// File reading, hashing and extraction all happen in the rayon worker pool;
// Python receives the path, hash, size and either the results or the error.

use super::PyExtractionResults;
use crate::extractors::manager::BatchFileResult;
use pyo3::prelude::*;

/// Result of processing a single file in batch extraction.
#[pyclass(name = "BatchFileResult")]
pub struct PyBatchFileResult {
    #[pyo3(get)]
    pub path: String,

    #[pyo3(get)]
    pub hash: String,

    #[pyo3(get)]
    pub size: usize,

    // No #[pyo3(get)]: PyExtractionResults is not Clone, see the getter below
    pub results: Option<PyExtractionResults>,

    #[pyo3(get)]
    pub error: Option<String>,
}

impl From<BatchFileResult> for PyBatchFileResult {
    fn from(file: BatchFileResult) -> Self {
        PyBatchFileResult {
            path: file.path,
            hash: file.hash,
            size: file.size,
            results: file.results.map(PyExtractionResults::from_extraction_results),
            error: file.error,
        }
    }
}

#[pymethods]
impl PyBatchFileResult {
    #[getter]
    fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Extraction results (None on error)
    ///
    /// Takes ownership of the results; later calls return None.
    #[getter]
    fn results(&mut self) -> Option<PyExtractionResults> {
        self.results.take()
    }

    fn __repr__(&self) -> String {
        if let Some(ref err) = self.error {
            format!("BatchFileResult(path={:?}, error={:?})", self.path, err)
        } else {
            format!(
                "BatchFileResult(path={:?}, hash={:?}, has_results={})",
                self.path,
                &self.hash[..8.min(self.hash.len())],
                self.results.is_some()
            )
        }
    }
}
