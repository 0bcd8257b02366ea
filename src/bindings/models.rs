// PyO3 wrappers for the model types
//
// Read-only views; type hints are exposed in their canonical annotation text
// (empty when undefined) together with the custom classes they reference.

use crate::extractors::base::{Attribute, ClassModel, Diagnostic, FunctionModel, Parameter, TypeHint};
use pyo3::prelude::*;

fn referenced(type_hint: &TypeHint) -> Vec<String> {
    type_hint
        .referenced_classes()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Python-accessible class attribute
#[pyclass(name = "Attribute")]
pub struct PyAttribute {
    inner: Attribute,
}

impl PyAttribute {
    pub fn from_attribute(attribute: Attribute) -> Self {
        PyAttribute { inner: attribute }
    }
}

#[pymethods]
impl PyAttribute {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn type_hint(&self) -> String {
        self.inner.type_hint.to_string()
    }

    #[getter]
    fn referenced_classes(&self) -> Vec<String> {
        referenced(&self.inner.type_hint)
    }

    fn __repr__(&self) -> String {
        format!("Attribute(name={:?}, type={:?})", self.inner.name, self.inner.type_hint.to_string())
    }
}

#[pyclass(name = "Parameter")]
pub struct PyParameter {
    inner: Parameter,
}

#[pymethods]
impl PyParameter {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn type_hint(&self) -> String {
        self.inner.type_hint.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Parameter(name={:?}, type={:?})", self.inner.name, self.inner.type_hint.to_string())
    }
}

/// Python-accessible function or method signature
#[pyclass(name = "FunctionModel")]
pub struct PyFunctionModel {
    inner: FunctionModel,
}

impl PyFunctionModel {
    pub fn from_function(function: FunctionModel) -> Self {
        PyFunctionModel { inner: function }
    }
}

#[pymethods]
impl PyFunctionModel {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn parameters(&self) -> Vec<PyParameter> {
        self.inner
            .parameters
            .iter()
            .map(|p| PyParameter { inner: p.clone() })
            .collect()
    }

    #[getter]
    fn return_type(&self) -> String {
        self.inner.return_type.to_string()
    }

    #[getter]
    fn nested_functions(&self) -> Vec<PyFunctionModel> {
        self.inner
            .nested_functions
            .iter()
            .map(|f| PyFunctionModel::from_function(f.clone()))
            .collect()
    }

    #[getter]
    fn nested_classes(&self) -> Vec<PyClassModel> {
        self.inner
            .nested_classes
            .iter()
            .map(|c| PyClassModel::from_class(c.clone()))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "FunctionModel(name={:?}, parameters={})",
            self.inner.name,
            self.inner.parameters.len()
        )
    }
}

/// Python-accessible class model
#[pyclass(name = "ClassModel")]
pub struct PyClassModel {
    inner: ClassModel,
}

impl PyClassModel {
    pub fn from_class(class: ClassModel) -> Self {
        PyClassModel { inner: class }
    }
}

#[pymethods]
impl PyClassModel {
    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn is_dataclass(&self) -> bool {
        self.inner.is_dataclass
    }

    #[getter]
    fn inherits_from(&self) -> Vec<String> {
        self.inner.inherits_from.clone()
    }

    #[getter]
    fn attributes(&self) -> Vec<PyAttribute> {
        self.inner
            .attributes
            .iter()
            .map(|a| PyAttribute::from_attribute(a.clone()))
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
    fn nested_classes(&self) -> Vec<PyClassModel> {
        self.inner
            .nested_classes
            .iter()
            .map(|c| PyClassModel::from_class(c.clone()))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "ClassModel(name={:?}, attributes={}, functions={})",
            self.inner.name,
            self.inner.attributes.len(),
            self.inner.functions.len()
        )
    }
}

#[pyclass(name = "Diagnostic")]
pub struct PyDiagnostic {
    inner: Diagnostic,
}

impl PyDiagnostic {
    pub fn from_diagnostic(diagnostic: Diagnostic) -> Self {
        PyDiagnostic { inner: diagnostic }
    }
}

#[pymethods]
impl PyDiagnostic {
    /// Snake-case kind, e.g. "type_conflict"
    #[getter]
    fn kind(&self) -> String {
        self.inner.kind.to_string()
    }

    #[getter]
    fn scope(&self) -> String {
        self.inner.scope.clone()
    }

    #[getter]
    fn line(&self) -> u32 {
        self.inner.line
    }

    #[getter]
    fn message(&self) -> String {
        self.inner.message.clone()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Diagnostic({})", self.inner)
    }
}
