// Base types shared by every extractor
//
// - syntax.rs: the declaration tree the model builder consumes
// - types.rs: the model it produces (TypeHint, ClassModel, FunctionModel, ...)
// - diagnostics.rs: non-fatal conditions and the scope path they are reported under
// - config.rs: lookup tables and conventions
// - error.rs: fatal per-file errors
// - extractor.rs / tree_methods.rs: BaseExtractor and tree-sitter navigation

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod syntax;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use config::{BuiltinType, ContainerKind, ExtractionConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Scope};
pub use error::ExtractError;
pub use extractor::BaseExtractor;
pub use syntax::{
    AnnotatedDecl, ClassDecl, Expr, FunctionDecl, Param, ParamKind, PlainAssign, Stmt,
};
pub use types::{
    Attribute, ClassModel, ExtractionResults, FunctionModel, Parameter, TypeHint,
};
