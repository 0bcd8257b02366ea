// Mermaid class diagram renderer
//
// Nested classes get an identifier with `_` in place of dots plus a label
// carrying the dotted name. Inheritance becomes `Base <|-- Child`; a custom
// class referenced from an attribute type becomes `Owner --> Target`.

use crate::extractors::base::{ClassModel, ExtractionResults, FunctionModel, TypeHint};
use crate::extractors::python::with_access_marker;
use std::collections::HashSet;

const INDENT: &str = "    ";

fn class_id(qualified: &str) -> String {
    qualified.replace('.', "_")
}

fn member_type(type_hint: &TypeHint) -> String {
    // Mermaid spells generic arguments between `~`
    type_hint.to_string().replace('[', "~").replace(']', "~")
}

fn method_line(function: &FunctionModel) -> String {
    let parameters = function
        .parameters
        .iter()
        .map(|parameter| {
            if parameter.type_hint.is_undefined() {
                parameter.name.clone()
            } else {
                format!("{}: {}", parameter.name, member_type(&parameter.type_hint))
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut line = format!("{}({})", with_access_marker(&function.name), parameters);
    if !function.return_type.is_undefined() {
        line.push(' ');
        line.push_str(&member_type(&function.return_type));
    }
    line
}

fn render_class(out: &mut String, qualified: &str, class: &ClassModel) {
    let id = class_id(qualified);
    if id != qualified {
        out.push_str(&format!("{}class {}[\"{}\"]\n", INDENT, id, qualified));
    }

    let has_body = class.is_dataclass || !class.attributes.is_empty() || !class.functions.is_empty();
    if !has_body {
        if id == qualified {
            out.push_str(&format!("{}class {}\n", INDENT, id));
        }
        return;
    }

    out.push_str(&format!("{}class {} {{\n", INDENT, id));
    if class.is_dataclass {
        out.push_str(&format!("{0}{0}<<dataclass>>\n", INDENT));
    }
    for attribute in &class.attributes {
        let mut line = with_access_marker(&attribute.name);
        if !attribute.type_hint.is_undefined() {
            line.push_str(": ");
            line.push_str(&member_type(&attribute.type_hint));
        }
        out.push_str(&format!("{0}{0}{1}\n", INDENT, line));
    }
    for function in &class.functions {
        out.push_str(&format!("{0}{0}{1}\n", INDENT, method_line(function)));
    }
    out.push_str(&format!("{}}}\n", INDENT));
}

pub fn render_mermaid(results: &ExtractionResults) -> String {
    let mut out = String::from("classDiagram\n");
    let mut edges = Vec::new();
    let mut seen = HashSet::new();

    for (qualified, model) in results.flatten_classes() {
        render_class(&mut out, &qualified, model);

        let id = class_id(&qualified);
        for base in &model.inherits_from {
            let edge = format!("{} <|-- {}", base, id);
            if seen.insert(edge.clone()) {
                edges.push(edge);
            }
        }
        for attribute in &model.attributes {
            for target in attribute.type_hint.referenced_classes() {
                let edge = format!("{} --> {}", id, target);
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }
    }

    for edge in edges {
        out.push_str(INDENT);
        out.push_str(&edge);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{Attribute, Parameter};

    fn custom(name: &str) -> TypeHint {
        TypeHint::CustomClass(name.to_string())
    }

    #[test]
    fn test_class_diagram() {
        let company = ClassModel {
            name: "Company".to_string(),
            is_dataclass: false,
            inherits_from: vec![],
            attributes: vec![
                Attribute::new("employees", TypeHint::List(Box::new(custom("Employee")))),
                Attribute::new("ceo", TypeHint::Union(vec![custom("Employee"), TypeHint::NoneType])),
                Attribute::new("_registry", TypeHint::Undefined),
            ],
            functions: vec![FunctionModel::new(
                "hire",
                vec![Parameter::new("person", custom("Person"))],
                TypeHint::Boolean,
            )],
            nested_classes: vec![ClassModel {
                name: "Meta".to_string(),
                is_dataclass: false,
                inherits_from: vec![],
                attributes: vec![],
                functions: vec![],
                nested_classes: vec![],
            }],
        };
        let employee = ClassModel {
            name: "Employee".to_string(),
            is_dataclass: true,
            inherits_from: vec!["Person".to_string()],
            attributes: vec![Attribute::new("salary", TypeHint::Float)],
            functions: vec![],
            nested_classes: vec![],
        };
        let results = ExtractionResults {
            file_path: "company.py".to_string(),
            classes: vec![company, employee],
            ..Default::default()
        };

        let expected = "\
classDiagram
    class Company {
        +employees: list~Employee~
        +ceo: Employee | None
        #registry
        +hire(person: Person) bool
    }
    class Company_Meta[\"Company.Meta\"]
    class Employee {
        <<dataclass>>
        +salary: float
    }
    Company --> Employee
    Person <|-- Employee
";
        assert_eq!(render_mermaid(&results), expected);
    }

    #[test]
    fn test_empty_class_is_declared() {
        let results = ExtractionResults {
            classes: vec![ClassModel {
                name: "Marker".to_string(),
                is_dataclass: false,
                inherits_from: vec![],
                attributes: vec![],
                functions: vec![],
                nested_classes: vec![],
            }],
            ..Default::default()
        };
        assert_eq!(render_mermaid(&results), "classDiagram\n    class Marker\n");
    }
}
