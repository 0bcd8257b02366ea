// Engine input tree
//
// The declaration shapes the model builder understands. A source tree provider
// (the tree-sitter lowering in `extractors::python::lowering`, or any caller that
// builds these values directly or deserializes them) hands a `Vec<Stmt>` per file
// to the engine. Everything is owned and immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statement as seen by the model builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    Class(ClassDecl),
    Function(FunctionDecl),
    Annotated(AnnotatedDecl),
    Assign(PlainAssign),
    /// Statements nested inside a compound statement (if/for/while/try/with/match),
    /// flattened in source order
    Block { body: Vec<Stmt> },
    /// Any statement shape the engine does not inspect
    Other { kind: String, line: u32 },
}

impl Stmt {
    /// 1-based source line of the statement, 0 when unknown
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Class(class) => class.line,
            Stmt::Function(function) => function.line,
            Stmt::Annotated(decl) => decl.line,
            Stmt::Assign(assign) => assign.line,
            Stmt::Block { body } => body.first().map(Stmt::line).unwrap_or(0),
            Stmt::Other { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub decorators: Vec<Expr>,
    /// Positional base expressions, in declaration order
    pub bases: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub decorators: Vec<Expr>,
    pub params: Vec<Param>,
    pub returns: Option<Expr>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Regular,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub annotation: Option<Expr>,
    pub kind: ParamKind,
}

impl Param {
    pub fn new(name: impl Into<String>, annotation: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            annotation,
            kind: ParamKind::Regular,
        }
    }
}

/// `target: annotation [= value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDecl {
    pub target: Expr,
    pub annotation: Expr,
    pub value: Option<Expr>,
    pub line: u32,
}

/// `t1 = t2 = ... = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainAssign {
    pub targets: Vec<Expr>,
    pub value: Option<Expr>,
    pub line: u32,
}

/// Expression shapes that matter for annotations and assignment targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Name { id: String },
    NoneLiteral,
    /// `value.attr`
    Attribute { value: Box<Expr>, attr: String },
    /// `head[slot, ...]`
    Subscript { head: Box<Expr>, slots: Vec<Expr> },
    /// `left | right`
    BinaryOr { left: Box<Expr>, right: Box<Expr> },
    /// Tuple, list pattern or bare comma group
    Tuple { elements: Vec<Expr> },
    /// `*inner`
    Starred { inner: Box<Expr> },
    Other { kind: String, text: String },
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name { id: id.into() }
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn subscript(head: Expr, slots: Vec<Expr>) -> Self {
        Expr::Subscript {
            head: Box::new(head),
            slots,
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::BinaryOr {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Expr::Tuple { elements }
    }

    pub fn other(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Expr::Other {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Short name of the node shape, used in diagnostics
    pub fn shape(&self) -> &str {
        match self {
            Expr::Name { .. } => "name",
            Expr::NoneLiteral => "none",
            Expr::Attribute { .. } => "attribute",
            Expr::Subscript { .. } => "subscript",
            Expr::BinaryOr { .. } => "binary_or",
            Expr::Tuple { .. } => "tuple",
            Expr::Starred { .. } => "starred",
            Expr::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Identifier of a bare name
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Name { id } => Some(id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name { id } => write!(f, "{}", id),
            Expr::NoneLiteral => write!(f, "None"),
            Expr::Attribute { value, attr } => write!(f, "{}.{}", value, attr),
            Expr::Subscript { head, slots } => {
                write!(f, "{}[", head)?;
                write_joined(f, slots)?;
                write!(f, "]")
            }
            Expr::BinaryOr { left, right } => write!(f, "{} | {}", left, right),
            Expr::Tuple { elements } => {
                write!(f, "(")?;
                write_joined(f, elements)?;
                write!(f, ")")
            }
            Expr::Starred { inner } => write!(f, "*{}", inner),
            Expr::Other { text, .. } => write!(f, "{}", text),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
