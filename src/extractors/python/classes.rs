// Class and function model building
//
// Recursive descent over the declaration tree. Each level receives its parent's
// scope explicitly; a class body, a function body and an initializer body are
// each walked once.

use super::attributes::{collect_constructor_fields, collect_dataclass_fields};
use super::decorators::is_dataclass;
use super::signatures::build_signature;
use super::ModelBuilder;
use crate::extractors::base::{
    ClassDecl, ClassModel, DiagnosticKind, FunctionDecl, FunctionModel, Scope, Stmt,
};
use tracing::debug;

/// Functions and classes declared directly inside one body
#[derive(Debug, Default)]
pub struct Members {
    pub functions: Vec<FunctionModel>,
    pub classes: Vec<ClassModel>,
}

/// Top-level classes and functions of a module, in source order
pub fn build_module(builder: &mut ModelBuilder<'_>, stmts: &[Stmt]) -> Members {
    let root = Scope::root();
    let mut members = Members::default();

    for stmt in stmts {
        match stmt {
            Stmt::Class(class) => members.classes.push(build_class(builder, class, &root)),
            Stmt::Function(function) => {
                members.functions.push(build_function(builder, function, &root, false))
            }
            _ => {}
        }
    }

    members
}

/// Build the model of one class and everything declared inside it
pub fn build_class(
    builder: &mut ModelBuilder<'_>,
    class: &ClassDecl,
    parent: &Scope<'_>,
) -> ClassModel {
    let scope = parent.child(&class.name);
    let config = builder.config();

    let is_dataclass = is_dataclass(&class.decorators, config);
    let inherits_from = collect_bases(builder, class, &scope);

    let (attributes, members) = if is_dataclass {
        let (attributes, consumed) = collect_dataclass_fields(builder, &class.body, &scope);
        let members = walk_members(builder, &class.body[consumed..], &scope, true, None);
        (attributes, members)
    } else {
        let initializer = class.body.iter().find_map(|stmt| match stmt {
            Stmt::Function(function) if function.name == config.initializer_name => {
                Some(function)
            }
            _ => None,
        });

        let attributes = match initializer {
            Some(initializer) => {
                let init_scope = scope.child(&initializer.name);
                collect_constructor_fields(builder, initializer, &init_scope)
            }
            None => {
                builder.report(
                    DiagnosticKind::MissingInitializer,
                    &scope,
                    class.line,
                    format!(
                        "class {} has no {} method",
                        class.name, config.initializer_name
                    ),
                );
                Vec::new()
            }
        };

        let members = walk_members(builder, &class.body, &scope, true, initializer);
        (attributes, members)
    };

    debug!(
        "Built class {} ({} attributes, {} functions, {} nested classes)",
        scope.path(),
        attributes.len(),
        members.functions.len(),
        members.classes.len()
    );

    ClassModel {
        name: class.name.clone(),
        is_dataclass,
        inherits_from,
        attributes,
        functions: members.functions,
        nested_classes: members.classes,
    }
}

/// Build a function model, recursing into its body for nested declarations
///
/// `is_method` is set for functions declared in a class body.
pub fn build_function(
    builder: &mut ModelBuilder<'_>,
    function: &FunctionDecl,
    parent: &Scope<'_>,
    is_method: bool,
) -> FunctionModel {
    let scope = parent.child(&function.name);
    let mut model = build_signature(builder, function, &scope, is_method);
    let members = walk_members(builder, &function.body, &scope, false, None);
    model.nested_functions = members.functions;
    model.nested_classes = members.classes;
    model
}

/// Simple base names; anything else is skipped with a diagnostic
fn collect_bases(builder: &mut ModelBuilder<'_>, class: &ClassDecl, scope: &Scope<'_>) -> Vec<String> {
    let mut bases = Vec::new();
    for base in &class.bases {
        match base.as_name() {
            Some(name) => bases.push(name.to_string()),
            None => builder.report(
                DiagnosticKind::SkippedBase,
                scope,
                class.line,
                format!("skipped base `{}` (not a simple name)", base),
            ),
        }
    }
    bases
}

/// Walk a body once for function and class declarations
///
/// Compound-statement blocks are searched too. `in_class` marks a class body,
/// whose functions are methods. `skip_initializer` is the definition already
/// consumed by attribute collection; a redefinition is an ordinary method.
fn walk_members(
    builder: &mut ModelBuilder<'_>,
    stmts: &[Stmt],
    scope: &Scope<'_>,
    in_class: bool,
    skip_initializer: Option<&FunctionDecl>,
) -> Members {
    let mut members = Members::default();
    walk_into(builder, stmts, scope, in_class, skip_initializer, &mut members);
    members
}

fn walk_into(
    builder: &mut ModelBuilder<'_>,
    stmts: &[Stmt],
    scope: &Scope<'_>,
    in_class: bool,
    skip_initializer: Option<&FunctionDecl>,
    members: &mut Members,
) {
    for stmt in stmts {
        match stmt {
            Stmt::Function(function) => {
                if skip_initializer.is_some_and(|consumed| std::ptr::eq(consumed, function)) {
                    continue;
                }
                members
                    .functions
                    .push(build_function(builder, function, scope, in_class));
            }
            Stmt::Class(class) => members.classes.push(build_class(builder, class, scope)),
            Stmt::Block { body } => walk_into(builder, body, scope, in_class, None, members),
            Stmt::Annotated(_) | Stmt::Assign(_) | Stmt::Other { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{
        AnnotatedDecl, Attribute, Diagnostic, Diagnostics, Expr, ExtractionConfig, Param,
        Parameter, PlainAssign, TypeHint,
    };

    fn function(name: &str, params: Vec<Param>, body: Vec<Stmt>) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            decorators: vec![],
            params,
            returns: None,
            body,
            is_async: false,
            line: 2,
        }
    }

    fn class(name: &str, decorators: Vec<Expr>, bases: Vec<Expr>, body: Vec<Stmt>) -> ClassDecl {
        ClassDecl {
            name: name.to_string(),
            decorators,
            bases,
            body,
            line: 1,
        }
    }

    fn self_param() -> Vec<Param> {
        vec![Param::new("self", None)]
    }

    fn build(decl: &ClassDecl) -> (ClassModel, Vec<Diagnostic>) {
        let config = ExtractionConfig::default();
        let mut diagnostics = Diagnostics::new("test.py");
        let model = {
            let mut builder = ModelBuilder::new(&config, &mut diagnostics);
            build_class(&mut builder, decl, &Scope::root())
        };
        (model, diagnostics.into_vec())
    }

    fn person() -> ClassDecl {
        let init = function(
            "__init__",
            vec![Param::new("self", None), Param::new("name", Some(Expr::name("str")))],
            vec![Stmt::Annotated(AnnotatedDecl {
                target: Expr::attribute(Expr::name("self"), "name"),
                annotation: Expr::name("str"),
                value: Some(Expr::name("name")),
                line: 3,
            })],
        );
        let greet = function("greet", self_param(), vec![]);
        class(
            "Person",
            vec![],
            vec![],
            vec![Stmt::Function(init), Stmt::Function(greet)],
        )
    }

    #[test]
    fn test_person_end_to_end() {
        let (model, diagnostics) = build(&person());

        let expected = ClassModel {
            name: "Person".to_string(),
            is_dataclass: false,
            inherits_from: vec![],
            attributes: vec![Attribute::new("name", TypeHint::String)],
            functions: vec![FunctionModel::new("greet", vec![], TypeHint::Undefined)],
            nested_classes: vec![],
        };
        assert_eq!(model, expected);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_rebuilding_is_idempotent() {
        let decl = person();
        assert_eq!(build(&decl), build(&decl));
    }

    #[test]
    fn test_missing_initializer_is_non_fatal() {
        let decl = class(
            "Empty",
            vec![],
            vec![],
            vec![Stmt::Function(function("run", self_param(), vec![]))],
        );
        let (model, diagnostics) = build(&decl);

        assert!(model.attributes.is_empty());
        assert_eq!(model.functions.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingInitializer);
        assert_eq!(diagnostics[0].scope, "Empty");
    }

    #[test]
    fn test_dataclass_remainder_is_walked_as_body() {
        let decl = class(
            "Point",
            vec![Expr::name("dataclass")],
            vec![Expr::name("Base")],
            vec![
                Stmt::Annotated(AnnotatedDecl {
                    target: Expr::name("x"),
                    annotation: Expr::name("float"),
                    value: None,
                    line: 3,
                }),
                Stmt::Function(function("norm", self_param(), vec![])),
                Stmt::Annotated(AnnotatedDecl {
                    target: Expr::name("late"),
                    annotation: Expr::name("int"),
                    value: None,
                    line: 6,
                }),
            ],
        );
        let (model, diagnostics) = build(&decl);

        assert!(model.is_dataclass);
        assert_eq!(model.inherits_from, vec!["Base"]);
        assert_eq!(model.attributes, vec![Attribute::new("x", TypeHint::Float)]);
        assert_eq!(model.functions[0].name, "norm");
        assert!(diagnostics.is_empty(), "dataclasses need no initializer");
    }

    #[test]
    fn test_complex_bases_are_skipped_with_diagnostic() {
        let decl = class(
            "Model",
            vec![],
            vec![
                Expr::name("Base"),
                Expr::attribute(Expr::name("abc"), "ABC"),
                Expr::subscript(Expr::name("Generic"), vec![Expr::name("T")]),
            ],
            vec![Stmt::Function(function("__init__", self_param(), vec![]))],
        );
        let (model, diagnostics) = build(&decl);

        assert_eq!(model.inherits_from, vec!["Base"]);
        let skipped: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::SkippedBase)
            .collect();
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn test_initializer_consumed_and_nested_declarations_recursed() {
        let inner_init = function(
            "__init__",
            self_param(),
            vec![Stmt::Assign(PlainAssign {
                targets: vec![Expr::attribute(Expr::name("self"), "depth")],
                value: Some(Expr::other("integer", "1")),
                line: 6,
            })],
        );
        let inner = class("Inner", vec![], vec![], vec![Stmt::Function(inner_init)]);
        let helper = function(
            "helper",
            self_param(),
            vec![Stmt::Function(function("local", vec![], vec![]))],
        );
        let outer_init = function(
            "__init__",
            self_param(),
            vec![Stmt::Class(class("Hidden", vec![], vec![], vec![]))],
        );
        let decl = class(
            "Outer",
            vec![],
            vec![],
            vec![
                Stmt::Function(outer_init),
                Stmt::Class(inner),
                Stmt::Function(helper),
            ],
        );

        let (model, diagnostics) = build(&decl);

        assert!(model.function("__init__").is_none());
        assert_eq!(model.functions.len(), 1);
        assert_eq!(model.functions[0].nested_functions[0].name, "local");
        assert_eq!(model.nested_classes.len(), 1);
        assert_eq!(model.nested_classes[0].name, "Inner");
        assert_eq!(
            model.nested_classes[0].attributes,
            vec![Attribute::new("depth", TypeHint::Undefined)]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_initializer_wins_and_redefinition_is_a_method() {
        let first = function(
            "__init__",
            self_param(),
            vec![Stmt::Assign(PlainAssign {
                targets: vec![Expr::attribute(Expr::name("self"), "first")],
                value: None,
                line: 3,
            })],
        );
        let second = function(
            "__init__",
            vec![Param::new("self", None), Param::new("size", Some(Expr::name("int")))],
            vec![Stmt::Assign(PlainAssign {
                targets: vec![Expr::attribute(Expr::name("self"), "second")],
                value: None,
                line: 6,
            })],
        );
        let decl = class(
            "Twice",
            vec![],
            vec![],
            vec![Stmt::Function(first), Stmt::Function(second)],
        );

        let (model, diagnostics) = build(&decl);

        assert_eq!(model.attributes, vec![Attribute::new("first", TypeHint::Undefined)]);
        assert_eq!(
            model.functions,
            vec![FunctionModel::new(
                "__init__",
                vec![Parameter::new("size", TypeHint::Integer)],
                TypeHint::Undefined
            )],
            "the later __init__ is reported as a method"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_functions_outside_classes_keep_every_parameter() {
        let config = ExtractionConfig::default();
        let mut diagnostics = Diagnostics::new("test.py");
        let local = function("local", vec![Param::new("self", None)], vec![]);
        let register = function(
            "register",
            vec![Param::new("cls", None), Param::new("name", Some(Expr::name("str")))],
            vec![Stmt::Function(local)],
        );
        let stmts = vec![Stmt::Function(register)];
        let members = {
            let mut builder = ModelBuilder::new(&config, &mut diagnostics);
            build_module(&mut builder, &stmts)
        };

        let register = &members.functions[0];
        let names: Vec<&str> = register.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cls", "name"]);
        assert_eq!(
            register.nested_functions[0].parameters,
            vec![Parameter::new("self", TypeHint::Undefined)],
            "nested functions are not methods"
        );
    }

    #[test]
    fn test_module_collects_top_level_only() {
        let config = ExtractionConfig::default();
        let mut diagnostics = Diagnostics::new("test.py");
        let stmts = vec![
            Stmt::Class(person()),
            Stmt::Function(function("main", vec![], vec![])),
            Stmt::Block {
                body: vec![Stmt::Class(class("Conditional", vec![], vec![], vec![]))],
            },
        ];
        let members = {
            let mut builder = ModelBuilder::new(&config, &mut diagnostics);
            build_module(&mut builder, &stmts)
        };

        assert_eq!(members.classes.len(), 1);
        assert_eq!(members.functions.len(), 1);
        assert_eq!(members.functions[0].name, "main");
    }
}
