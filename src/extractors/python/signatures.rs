// Function signatures
//
// Name, declared parameters and return type of a function. Nested declarations
// are filled in by the class builder's walk of the body, not here.

use super::decorators::decorator_simple_name;
use super::type_hints::resolve_at_site;
use super::ModelBuilder;
use crate::extractors::base::{
    DiagnosticKind, FunctionDecl, FunctionModel, Param, ParamKind, Parameter, Scope,
};

/// The implicit receiver: a leading regular parameter
pub(super) fn implicit_receiver(params: &[Param]) -> Option<&Param> {
    params.first().filter(|param| param.kind == ParamKind::Regular)
}

/// Build the signature part of a `FunctionModel`
///
/// `scope` is the function's own scope. `is_method` marks a function declared
/// directly in a class body; its leading parameter is the receiver and is left
/// out unless a receiverless decorator (`@staticmethod`) is present. Splats are
/// left out too; a missing annotation resolves to `Undefined`.
pub fn build_signature(
    builder: &mut ModelBuilder<'_>,
    function: &FunctionDecl,
    scope: &Scope<'_>,
    is_method: bool,
) -> FunctionModel {
    let config = builder.config();
    let receiverless = function
        .decorators
        .iter()
        .filter_map(decorator_simple_name)
        .any(|name| config.is_receiverless_decorator(name));
    let skip = usize::from(
        is_method && !receiverless && implicit_receiver(&function.params).is_some(),
    );
    let mut parameters = Vec::new();

    for param in function.params.iter().skip(skip) {
        if param.kind != ParamKind::Regular {
            continue;
        }

        if param.annotation.is_none() && config.require_annotations {
            builder.report(
                DiagnosticKind::MissingAnnotation,
                scope,
                function.line,
                format!("parameter '{}' has no type annotation", param.name),
            );
        }

        let type_hint = resolve_at_site(builder, param.annotation.as_ref(), scope, function.line);
        parameters.push(Parameter::new(param.name.clone(), type_hint));
    }

    let return_type = resolve_at_site(builder, function.returns.as_ref(), scope, function.line);
    FunctionModel::new(function.name.clone(), parameters, return_type)
}

/// UML access marker for a member name: `__x` is private, `_x` protected,
/// everything else (dunder names included) public
pub fn access_marker(name: &str) -> char {
    if name.starts_with("__") && !name.ends_with("__") {
        '-'
    } else if name.starts_with('_') && !name.starts_with("__") {
        '#'
    } else {
        '+'
    }
}

/// Member name prefixed with its access marker, leading underscores removed
pub fn with_access_marker(name: &str) -> String {
    let marker = access_marker(name);
    let bare = if marker == '+' {
        name
    } else {
        name.trim_start_matches('_')
    };
    format!("{}{}", marker, bare)
}
