// Extraction configuration
//
// Lookup tables and naming conventions the model builder consults. A single
// `ExtractionConfig` is built by the caller and passed by reference into every
// extraction; nothing here is global or mutated during a pass.

use super::error::ExtractError;
use super::types::TypeHint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Builtin scalar types a bare identifier can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinType {
    None,
    Bool,
    Int,
    Float,
    Str,
}

impl BuiltinType {
    pub fn type_hint(self) -> TypeHint {
        match self {
            BuiltinType::None => TypeHint::NoneType,
            BuiltinType::Bool => TypeHint::Boolean,
            BuiltinType::Int => TypeHint::Integer,
            BuiltinType::Float => TypeHint::Float,
            BuiltinType::Str => TypeHint::String,
        }
    }
}

/// Generic containers a subscript head can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    List,
    Set,
    Dict,
    Tuple,
}

impl ContainerKind {
    /// Number of inner slots the container takes, `None` for variadic
    pub fn arity(self) -> Option<usize> {
        match self {
            ContainerKind::List | ContainerKind::Set => Some(1),
            ContainerKind::Dict => Some(2),
            ContainerKind::Tuple => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::List => "list",
            ContainerKind::Set => "set",
            ContainerKind::Dict => "dict",
            ContainerKind::Tuple => "tuple",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Identifier → builtin type (anything else becomes a custom class)
    pub builtin_types: HashMap<String, BuiltinType>,
    /// Subscript head identifier → container
    pub containers: HashMap<String, ContainerKind>,
    /// Decorator simple names marking a dataclass-style class
    pub dataclass_markers: Vec<String>,
    /// Name of the constructor method scanned for attributes
    pub initializer_name: String,
    /// Receiver assumed when an initializer declares no parameters
    pub default_receiver: String,
    /// Decorator simple names of methods that take no implicit receiver
    pub receiverless_decorators: Vec<String>,
    /// Record a diagnostic for every field or parameter left without annotation
    pub require_annotations: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let builtin_types = [
            ("None", BuiltinType::None),
            ("bool", BuiltinType::Bool),
            ("int", BuiltinType::Int),
            ("float", BuiltinType::Float),
            ("str", BuiltinType::Str),
        ]
        .into_iter()
        .map(|(name, builtin)| (name.to_string(), builtin))
        .collect();

        let containers = [
            ("list", ContainerKind::List),
            ("set", ContainerKind::Set),
            ("dict", ContainerKind::Dict),
            ("tuple", ContainerKind::Tuple),
        ]
        .into_iter()
        .map(|(name, kind)| (name.to_string(), kind))
        .collect();

        Self {
            builtin_types,
            containers,
            dataclass_markers: vec!["dataclass".to_string()],
            initializer_name: "__init__".to_string(),
            default_receiver: "self".to_string(),
            receiverless_decorators: vec!["staticmethod".to_string()],
            require_annotations: false,
        }
    }
}

impl ExtractionConfig {
    /// Parse a JSON configuration; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(|source| ExtractError::Config {
            origin: "<inline>".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ExtractError::Config {
            origin: path.display().to_string(),
            source,
        })
    }

    pub fn builtin(&self, identifier: &str) -> Option<TypeHint> {
        self.builtin_types
            .get(identifier)
            .map(|builtin| builtin.type_hint())
    }

    pub fn container(&self, identifier: &str) -> Option<ContainerKind> {
        self.containers.get(identifier).copied()
    }

    pub fn is_dataclass_marker(&self, simple_name: &str) -> bool {
        self.dataclass_markers.iter().any(|marker| marker == simple_name)
    }

    pub fn is_receiverless_decorator(&self, simple_name: &str) -> bool {
        self.receiverless_decorators
            .iter()
            .any(|marker| marker == simple_name)
    }
}
