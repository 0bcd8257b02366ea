// Plain-text report
//
// One block per class (nested classes listed under their dotted name), members
// prefixed with UML access markers, followed by module functions and any
// diagnostics.

use crate::extractors::base::{ClassModel, ExtractionResults, FunctionModel, Parameter, TypeHint};
use crate::extractors::python::with_access_marker;

const INDENT: &str = "    ";

pub fn render_text(results: &ExtractionResults) -> String {
    let mut out = String::new();

    for (qualified, model) in results.flatten_classes() {
        render_class(&mut out, &qualified, model);
        out.push('\n');
    }

    for function in &results.functions {
        render_function(&mut out, function, false, 0);
    }
    if !results.functions.is_empty() {
        out.push('\n');
    }

    if !results.diagnostics.is_empty() {
        out.push_str("diagnostics:\n");
        for diagnostic in &results.diagnostics {
            out.push_str(INDENT);
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
    }

    out
}

fn render_class(out: &mut String, qualified: &str, class: &ClassModel) {
    out.push_str("class ");
    out.push_str(qualified);
    if !class.inherits_from.is_empty() {
        out.push_str(&format!("({})", class.inherits_from.join(", ")));
    }
    if class.is_dataclass {
        out.push_str(" @dataclass");
    }
    out.push('\n');

    for attribute in &class.attributes {
        out.push_str(INDENT);
        out.push_str(&with_access_marker(&attribute.name));
        push_annotation(out, &attribute.type_hint);
        out.push('\n');
    }

    for function in &class.functions {
        render_function(out, function, true, 1);
    }
}

/// Methods carry an access marker; free and nested functions a `def ` prefix
fn render_function(out: &mut String, function: &FunctionModel, is_method: bool, depth: usize) {
    out.push_str(&INDENT.repeat(depth));
    if is_method {
        out.push_str(&with_access_marker(&function.name));
    } else {
        out.push_str("def ");
        out.push_str(&function.name);
    }
    out.push('(');
    out.push_str(&render_parameters(&function.parameters));
    out.push(')');
    if !function.return_type.is_undefined() {
        out.push_str(&format!(" -> {}", function.return_type));
    }
    out.push('\n');

    for nested in &function.nested_functions {
        render_function(out, nested, false, depth + 1);
    }
}

fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|parameter| {
            let mut text = parameter.name.clone();
            push_annotation(&mut text, &parameter.type_hint);
            text
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_annotation(out: &mut String, type_hint: &TypeHint) {
    if !type_hint.is_undefined() {
        out.push_str(": ");
        out.push_str(&type_hint.to_string());
    }
}
