// Model types
//
// The structural model produced per file: type hints, attributes, parameters,
// functions and classes. Built once per extraction pass and never mutated after
// being handed to the caller.

use super::diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved, language-agnostic representation of a declared type
///
/// Closed set of variants; every renderer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "args", rename_all = "snake_case")]
pub enum TypeHint {
    Undefined,
    NoneType,
    Boolean,
    Integer,
    Float,
    String,
    CustomClass(String),
    List(Box<TypeHint>),
    Set(Box<TypeHint>),
    /// Fixed arity, one slot per declared element
    Tuple(Vec<TypeHint>),
    Dict(Box<TypeHint>, Box<TypeHint>),
    /// At least two branches, first-appearance order, duplicates kept
    Union(Vec<TypeHint>),
}

impl TypeHint {
    /// Union of two resolved hints, splicing the branches of either side when it is
    /// already a union so chains stay flat
    pub fn union_of(left: TypeHint, right: TypeHint) -> TypeHint {
        let mut branches = Vec::new();
        for side in [left, right] {
            match side {
                TypeHint::Union(inner) => branches.extend(inner),
                other => branches.push(other),
            }
        }
        TypeHint::Union(branches)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, TypeHint::Undefined)
    }

    /// Custom class names referenced anywhere inside this hint, in order of appearance
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_classes(&mut names);
        names
    }

    fn collect_classes<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeHint::CustomClass(name) => names.push(name.as_str()),
            TypeHint::List(inner) | TypeHint::Set(inner) => inner.collect_classes(names),
            TypeHint::Dict(key, value) => {
                key.collect_classes(names);
                value.collect_classes(names);
            }
            TypeHint::Tuple(slots) | TypeHint::Union(slots) => {
                for slot in slots {
                    slot.collect_classes(names);
                }
            }
            TypeHint::Undefined
            | TypeHint::NoneType
            | TypeHint::Boolean
            | TypeHint::Integer
            | TypeHint::Float
            | TypeHint::String => {}
        }
    }
}

/// Canonical text form, the way the hint is written in a Python annotation
impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Undefined => Ok(()),
            TypeHint::NoneType => write!(f, "None"),
            TypeHint::Boolean => write!(f, "bool"),
            TypeHint::Integer => write!(f, "int"),
            TypeHint::Float => write!(f, "float"),
            TypeHint::String => write!(f, "str"),
            TypeHint::CustomClass(name) => write!(f, "{}", name),
            TypeHint::List(inner) => write!(f, "list[{}]", inner),
            TypeHint::Set(inner) => write!(f, "set[{}]", inner),
            TypeHint::Tuple(slots) => write!(f, "tuple[{}]", join(slots, ", ")),
            TypeHint::Dict(key, value) => write!(f, "dict[{}, {}]", key, value),
            TypeHint::Union(branches) => write!(f, "{}", join(branches, " | ")),
        }
    }
}

fn join(hints: &[TypeHint], separator: &str) -> String {
    hints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// A class field. Unique by name within one `ClassModel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub type_hint: TypeHint,
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            type_hint,
        }
    }
}

/// A declared function parameter (implicit receiver excluded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_hint: TypeHint,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            type_hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionModel {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeHint,
    pub nested_functions: Vec<FunctionModel>,
    pub nested_classes: Vec<ClassModel>,
}

impl FunctionModel {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, return_type: TypeHint) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            nested_functions: Vec::new(),
            nested_classes: Vec::new(),
        }
    }

    /// Classes declared anywhere inside this function's body, qualified by the
    /// enclosing path (`Outer.method.Local`)
    fn local_classes_into<'a>(&'a self, prefix: Option<&str>, out: &mut Vec<(String, &'a ClassModel)>) {
        let qualified = match prefix {
            Some(prefix) => format!("{}.{}", prefix, self.name),
            None => self.name.clone(),
        };
        for class in &self.nested_classes {
            class.flatten_into(Some(&qualified), out);
        }
        for nested in &self.nested_functions {
            nested.local_classes_into(Some(&qualified), out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    pub is_dataclass: bool,
    /// Simple base names only
    pub inherits_from: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub functions: Vec<FunctionModel>,
    pub nested_classes: Vec<ClassModel>,
}

impl ClassModel {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Look up a directly declared function by name
    pub fn function(&self, name: &str) -> Option<&FunctionModel> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// This class followed by every class declared inside it (depth-first),
    /// including classes local to its methods, paired with the dotted
    /// qualified name
    pub fn flatten(&self) -> Vec<(String, &ClassModel)> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: Option<&str>, out: &mut Vec<(String, &'a ClassModel)>) {
        let qualified = match prefix {
            Some(prefix) => format!("{}.{}", prefix, self.name),
            None => self.name.clone(),
        };
        out.push((qualified.clone(), self));
        for nested in &self.nested_classes {
            nested.flatten_into(Some(&qualified), out);
        }
        for function in &self.functions {
            function.local_classes_into(Some(&qualified), out);
        }
    }
}

/// Everything extracted from one source file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionResults {
    pub file_path: String,
    /// Top-level classes, in source order
    pub classes: Vec<ClassModel>,
    /// Top-level functions, in source order
    pub functions: Vec<FunctionModel>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionResults {
    /// Every class model in the file with its qualified name: top-level classes
    /// with everything nested in them, then classes local to module functions
    pub fn flatten_classes(&self) -> Vec<(String, &ClassModel)> {
        let mut out = Vec::new();
        for class in &self.classes {
            class.flatten_into(None, &mut out);
        }
        for function in &self.functions {
            function.local_classes_into(None, &mut out);
        }
        out
    }

    /// Concatenate per-file results; files are independent so order is only
    /// preserved, never required
    pub fn combine(results: impl IntoIterator<Item = ExtractionResults>) -> ExtractionResults {
        let mut combined = ExtractionResults {
            file_path: String::new(),
            ..Default::default()
        };
        for result in results {
            combined.classes.extend(result.classes);
            combined.functions.extend(result.functions);
            combined.diagnostics.extend(result.diagnostics);
        }
        combined
    }
}
