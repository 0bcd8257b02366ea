// TypeScript interface renderer
//
// Each class (nested and function-local ones included, named with `_` joining the enclosing
// scope names) becomes an `interface`; module functions become
// `declare function` signatures.

use crate::extractors::base::{ClassModel, ExtractionResults, FunctionModel, TypeHint};

/// Map a resolved hint to its TypeScript spelling
pub fn ts_type(type_hint: &TypeHint) -> String {
    match type_hint {
        TypeHint::Undefined => "any".to_string(),
        TypeHint::NoneType => "null".to_string(),
        TypeHint::Boolean => "boolean".to_string(),
        TypeHint::Integer | TypeHint::Float => "number".to_string(),
        TypeHint::String => "string".to_string(),
        TypeHint::CustomClass(name) => name.clone(),
        TypeHint::List(inner) => format!("Array<{}>", ts_type(inner)),
        TypeHint::Set(inner) => format!("Set<{}>", ts_type(inner)),
        TypeHint::Tuple(slots) => format!("[{}]", join_types(slots, ", ")),
        TypeHint::Dict(key, value) => format!("Map<{}, {}>", ts_type(key), ts_type(value)),
        TypeHint::Union(branches) => join_types(branches, " | "),
    }
}

fn join_types(hints: &[TypeHint], separator: &str) -> String {
    hints.iter().map(ts_type).collect::<Vec<_>>().join(separator)
}

fn return_type(type_hint: &TypeHint) -> String {
    match type_hint {
        TypeHint::Undefined | TypeHint::NoneType => "void".to_string(),
        other => ts_type(other),
    }
}

fn signature(function: &FunctionModel) -> String {
    let parameters = function
        .parameters
        .iter()
        .map(|parameter| format!("{}: {}", parameter.name, ts_type(&parameter.type_hint)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({}): {}", function.name, parameters, return_type(&function.return_type))
}

fn render_interface(out: &mut String, qualified: &str, class: &ClassModel) {
    out.push_str("interface ");
    out.push_str(&qualified.replace('.', "_"));
    if !class.inherits_from.is_empty() {
        out.push_str(" extends ");
        out.push_str(&class.inherits_from.join(", "));
    }
    out.push_str(" {\n");

    for attribute in &class.attributes {
        out.push_str(&format!("    {}: {};\n", attribute.name, ts_type(&attribute.type_hint)));
    }
    for function in &class.functions {
        out.push_str(&format!("    {};\n", signature(function)));
    }

    out.push_str("}\n");
}

pub fn render_typescript(results: &ExtractionResults) -> String {
    let mut blocks = Vec::new();

    for (qualified, model) in results.flatten_classes() {
        let mut block = String::new();
        render_interface(&mut block, &qualified, model);
        blocks.push(block);
    }

    if !results.functions.is_empty() {
        let declarations: String = results
            .functions
            .iter()
            .map(|function| format!("declare function {};\n", signature(function)))
            .collect();
        blocks.push(declarations);
    }

    blocks.join("\n")
}
