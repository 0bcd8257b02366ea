// Diagnostics
//
// Non-fatal conditions found while building a model. They are collected next to
// the model in `ExtractionResults` and logged through `tracing`; nothing recorded
// for one file can affect another.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Kinds of recoverable conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Annotation or destructuring shape not recognized
    StructuralUnsupported,
    /// Subscript head is not a known container
    UnresolvedContainer,
    /// Non-dataclass class without an initializer
    MissingInitializer,
    /// Same attribute discovered with two different resolved types
    TypeConflict,
    /// Base class expression that is not a simple name
    SkippedBase,
    /// Field or parameter without annotation while annotations are required
    MissingAnnotation,
    /// The parser had to recover from invalid syntax
    SyntaxError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::StructuralUnsupported => write!(f, "structural_unsupported"),
            DiagnosticKind::UnresolvedContainer => write!(f, "unresolved_container"),
            DiagnosticKind::MissingInitializer => write!(f, "missing_initializer"),
            DiagnosticKind::TypeConflict => write!(f, "type_conflict"),
            DiagnosticKind::SkippedBase => write!(f, "skipped_base"),
            DiagnosticKind::MissingAnnotation => write!(f, "missing_annotation"),
            DiagnosticKind::SyntaxError => write!(f, "syntax_error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Dotted path of the enclosing declarations, e.g. `Outer.Inner.__init__`
    pub scope: String,
    /// 1-based source line, 0 when unknown
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "[{}] line {}: {}", self.kind, self.line, self.message)
        } else {
            write!(
                f,
                "[{}] {} (line {}): {}",
                self.kind, self.scope, self.line, self.message
            )
        }
    }
}

/// Collector for the diagnostics of one extraction pass
#[derive(Debug, Default)]
pub struct Diagnostics {
    file_path: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            entries: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        scope: &Scope<'_>,
        line: u32,
        message: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            scope: scope.path(),
            line,
            message: message.into(),
        };

        if kind == DiagnosticKind::SkippedBase {
            debug!("{}: {}", self.file_path, diagnostic);
        } else {
            warn!("{}: {}", self.file_path, diagnostic);
        }

        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Lexical position in the declaration tree, passed down the recursion
///
/// Each level borrows its parent, so the path exists only on the call stack.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    parent: Option<&'a Scope<'a>>,
    name: &'a str,
}

impl<'a> Scope<'a> {
    /// The module level (empty path)
    pub fn root() -> Scope<'static> {
        Scope {
            parent: None,
            name: "",
        }
    }

    pub fn child<'b>(&'b self, name: &'b str) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            parent: Some(self),
            name,
        }
    }

    pub fn path(&self) -> String {
        match self.parent {
            Some(parent) => {
                let parent_path = parent.path();
                if parent_path.is_empty() {
                    self.name.to_string()
                } else {
                    format!("{}.{}", parent_path, self.name)
                }
            }
            None => self.name.to_string(),
        }
    }
}
