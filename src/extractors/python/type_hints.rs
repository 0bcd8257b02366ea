// Type hint resolution
//
// Turns one annotation expression into a `TypeHint`, recursing through
// subscripted containers and `|` chains. Resolution is pure: failures come back
// as `ResolveError` and the caller decides what to record at the annotation site.

use super::ModelBuilder;
use crate::extractors::base::{
    ContainerKind, DiagnosticKind, Expr, ExtractionConfig, Scope, TypeHint,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unsupported annotation shape '{shape}' in `{text}`")]
    StructuralUnsupported { shape: String, text: String },

    #[error("`{head}` is not a known container")]
    UnresolvedContainer { head: String },

    #[error("{container} takes {expected} type argument(s), found {found}")]
    Arity {
        container: &'static str,
        expected: usize,
        found: usize,
    },
}

impl ResolveError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            ResolveError::UnresolvedContainer { .. } => DiagnosticKind::UnresolvedContainer,
            ResolveError::StructuralUnsupported { .. } | ResolveError::Arity { .. } => {
                DiagnosticKind::StructuralUnsupported
            }
        }
    }

    fn unsupported(expr: &Expr) -> Self {
        ResolveError::StructuralUnsupported {
            shape: expr.shape().to_string(),
            text: expr.to_string(),
        }
    }
}

/// Resolve an optional annotation; a missing annotation is `Undefined`
pub fn resolve_optional(
    annotation: Option<&Expr>,
    config: &ExtractionConfig,
) -> Result<TypeHint, ResolveError> {
    match annotation {
        Some(expr) => resolve_annotation(expr, config),
        None => Ok(TypeHint::Undefined),
    }
}

/// Resolve one annotation expression
///
/// A container either resolves completely or the whole annotation fails; there is
/// no partially resolved result.
pub fn resolve_annotation(expr: &Expr, config: &ExtractionConfig) -> Result<TypeHint, ResolveError> {
    match expr {
        Expr::NoneLiteral => Ok(TypeHint::NoneType),
        Expr::Name { id } => Ok(config
            .builtin(id)
            .unwrap_or_else(|| TypeHint::CustomClass(id.clone()))),
        Expr::Subscript { head, slots } => resolve_subscript(head, slots, config),
        Expr::BinaryOr { left, right } => {
            let left = resolve_annotation(left, config)?;
            let right = resolve_annotation(right, config)?;
            Ok(TypeHint::union_of(left, right))
        }
        Expr::Attribute { .. } | Expr::Tuple { .. } | Expr::Starred { .. } | Expr::Other { .. } => {
            Err(ResolveError::unsupported(expr))
        }
    }
}

fn resolve_subscript(
    head: &Expr,
    slots: &[Expr],
    config: &ExtractionConfig,
) -> Result<TypeHint, ResolveError> {
    let container = head
        .as_name()
        .and_then(|id| config.container(id))
        .ok_or_else(|| ResolveError::UnresolvedContainer {
            head: head.to_string(),
        })?;

    // `tuple[(int, str)]` carries its slots in one parenthesized group
    let slots: &[Expr] = match slots {
        [Expr::Tuple { elements }] => elements,
        _ => slots,
    };

    if let Some(expected) = container.arity() {
        if slots.len() != expected {
            return Err(ResolveError::Arity {
                container: container.as_str(),
                expected,
                found: slots.len(),
            });
        }
    }

    let mut inner = slots
        .iter()
        .map(|slot| resolve_annotation(slot, config))
        .collect::<Result<Vec<_>, _>>()?;

    let hint = match container {
        ContainerKind::List => TypeHint::List(Box::new(inner.remove(0))),
        ContainerKind::Set => TypeHint::Set(Box::new(inner.remove(0))),
        ContainerKind::Dict => {
            let value = inner.remove(1);
            let key = inner.remove(0);
            TypeHint::Dict(Box::new(key), Box::new(value))
        }
        ContainerKind::Tuple => TypeHint::Tuple(inner),
    };
    Ok(hint)
}

/// Resolve an annotation at a declaration site
///
/// A resolution failure is recorded against `scope` and the site degrades to
/// `Undefined`; the rest of the model is unaffected.
pub fn resolve_at_site(
    builder: &mut ModelBuilder<'_>,
    annotation: Option<&Expr>,
    scope: &Scope<'_>,
    line: u32,
) -> TypeHint {
    match resolve_optional(annotation, builder.config()) {
        Ok(hint) => hint,
        Err(error) => {
            builder.report(error.kind(), scope, line, error.to_string());
            TypeHint::Undefined
        }
    }
}
