// tree-sitter-python CST lowering
//
// Converts the concrete tree into the declaration shapes in `base::syntax`.
// Annotations can arrive either as expression nodes (`subscript`,
// `binary_operator`, `attribute`) or as the grammar's type nodes (`generic_type`,
// `union_type`, `member_type`); both lower to the same `Expr`.

use super::PythonExtractor;
use crate::extractors::base::{
    AnnotatedDecl, BaseExtractor, ClassDecl, Expr, FunctionDecl, Param, ParamKind, PlainAssign,
    Stmt,
};
use tree_sitter::Node;

/// Compound statements whose nested statements are flattened into a `Stmt::Block`
const COMPOUND_STATEMENTS: &[&str] = &[
    "if_statement",
    "for_statement",
    "while_statement",
    "try_statement",
    "with_statement",
    "match_statement",
    "case_clause",
];

/// Lower every statement of a `module` (or `block`) node
pub(super) fn lower_module(extractor: &PythonExtractor, root: Node) -> Vec<Stmt> {
    lower_block(extractor.base(), root)
}

fn lower_block(base: &BaseExtractor, node: Node) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    for child in base.named_children(&node) {
        if let Some(stmt) = lower_statement(base, child) {
            stmts.push(stmt);
        }
    }
    stmts
}

fn lower_statement(base: &BaseExtractor, node: Node) -> Option<Stmt> {
    let line = BaseExtractor::line_of(&node);
    let stmt = match node.kind() {
        "class_definition" => Stmt::Class(lower_class(base, node, Vec::new())),
        "function_definition" => Stmt::Function(lower_function(base, node, Vec::new())),
        "decorated_definition" => lower_decorated(base, node)?,
        "expression_statement" => lower_expression_statement(base, node),
        kind if COMPOUND_STATEMENTS.contains(&kind) => Stmt::Block {
            body: lower_compound(base, node),
        },
        "comment" => return None,
        kind => Stmt::Other {
            kind: kind.to_string(),
            line,
        },
    };
    Some(stmt)
}

/// Statements nested in a compound statement, in source order
///
/// Conditions, patterns and other header expressions are ignored.
fn lower_compound(base: &BaseExtractor, node: Node) -> Vec<Stmt> {
    let mut body = Vec::new();
    for child in base.named_children(&node) {
        match child.kind() {
            "block" => body.extend(lower_block(base, child)),
            kind if kind.ends_with("_clause") && kind != "with_clause" => {
                body.extend(lower_compound(base, child))
            }
            _ => {}
        }
    }
    body
}

fn lower_decorated(base: &BaseExtractor, node: Node) -> Option<Stmt> {
    let decorators: Vec<Expr> = base
        .find_children_by_type(&node, "decorator")
        .into_iter()
        .filter_map(|decorator| base.named_children(&decorator).into_iter().next())
        .map(|expression| lower_decorator_expr(base, expression))
        .collect();

    let definition = node.child_by_field_name("definition")?;
    let stmt = match definition.kind() {
        "class_definition" => Stmt::Class(lower_class(base, definition, decorators)),
        "function_definition" => Stmt::Function(lower_function(base, definition, decorators)),
        kind => Stmt::Other {
            kind: kind.to_string(),
            line: BaseExtractor::line_of(&node),
        },
    };
    Some(stmt)
}

/// `@name(args)` is recorded as its callee
fn lower_decorator_expr(base: &BaseExtractor, expression: Node) -> Expr {
    if expression.kind() == "call" {
        if let Some(callee) = expression.child_by_field_name("function") {
            return lower_expr(base, callee);
        }
    }
    lower_expr(base, expression)
}

fn lower_class(base: &BaseExtractor, node: Node, decorators: Vec<Expr>) -> ClassDecl {
    let name = base.get_field_text(&node, "name").unwrap_or_default();

    // Keyword arguments such as `metaclass=...` are not bases
    let bases = node
        .child_by_field_name("superclasses")
        .map(|arguments| {
            base.named_children(&arguments)
                .into_iter()
                .filter(|argument| argument.kind() != "keyword_argument")
                .map(|argument| lower_expr(base, argument))
                .collect()
        })
        .unwrap_or_default();

    let body = node
        .child_by_field_name("body")
        .map(|block| lower_block(base, block))
        .unwrap_or_default();

    ClassDecl {
        name,
        decorators,
        bases,
        body,
        line: BaseExtractor::line_of(&node),
    }
}

fn lower_function(base: &BaseExtractor, node: Node, decorators: Vec<Expr>) -> FunctionDecl {
    let name = base.get_field_text(&node, "name").unwrap_or_default();

    let params = node
        .child_by_field_name("parameters")
        .map(|parameters| lower_parameters(base, parameters))
        .unwrap_or_default();

    let returns = node
        .child_by_field_name("return_type")
        .map(|annotation| lower_expr(base, annotation));

    let body = node
        .child_by_field_name("body")
        .map(|block| lower_block(base, block))
        .unwrap_or_default();

    FunctionDecl {
        name,
        decorators,
        params,
        returns,
        body,
        is_async: base.find_child_by_type(&node, "async").is_some(),
        line: BaseExtractor::line_of(&node),
    }
}

fn lower_parameters(base: &BaseExtractor, parameters: Node) -> Vec<Param> {
    let mut params = Vec::new();

    for child in base.named_children(&parameters) {
        let param = match child.kind() {
            "identifier" => Some(Param::new(base.get_node_text(&child), None)),
            "list_splat_pattern" | "dictionary_splat_pattern" => splat_param(base, child, None),
            "default_parameter" => child
                .child_by_field_name("name")
                .filter(|name| name.kind() == "identifier")
                .map(|name| Param::new(base.get_node_text(&name), None)),
            "typed_default_parameter" => {
                let annotation = child
                    .child_by_field_name("type")
                    .map(|annotation| lower_expr(base, annotation));
                child
                    .child_by_field_name("name")
                    .map(|name| Param::new(base.get_node_text(&name), annotation))
            }
            "typed_parameter" => {
                let annotation = child
                    .child_by_field_name("type")
                    .map(|annotation| lower_expr(base, annotation));
                // The name is the first named child: an identifier or a splat pattern
                match base.named_children(&child).into_iter().next() {
                    Some(name) if name.kind() == "identifier" => {
                        Some(Param::new(base.get_node_text(&name), annotation))
                    }
                    Some(splat) => splat_param(base, splat, annotation),
                    None => None,
                }
            }
            // `/` and `*` separators, legacy tuple parameters
            _ => None,
        };

        params.extend(param);
    }

    params
}

fn splat_param(base: &BaseExtractor, node: Node, annotation: Option<Expr>) -> Option<Param> {
    let kind = match node.kind() {
        "list_splat_pattern" => ParamKind::VarPositional,
        "dictionary_splat_pattern" => ParamKind::VarKeyword,
        _ => return None,
    };
    let name = base.find_child_by_type(&node, "identifier")?;
    Some(Param {
        name: base.get_node_text(&name),
        annotation,
        kind,
    })
}

fn lower_expression_statement(base: &BaseExtractor, node: Node) -> Stmt {
    let children = base.named_children(&node);
    match children.as_slice() {
        [assignment] if assignment.kind() == "assignment" => lower_assignment(base, *assignment),
        [single] => Stmt::Other {
            kind: single.kind().to_string(),
            line: BaseExtractor::line_of(&node),
        },
        _ => Stmt::Other {
            kind: node.kind().to_string(),
            line: BaseExtractor::line_of(&node),
        },
    }
}

/// `target: T [= value]` or `t1 = t2 = ... = value`
fn lower_assignment(base: &BaseExtractor, node: Node) -> Stmt {
    let line = BaseExtractor::line_of(&node);
    let left = node.child_by_field_name("left");
    let right = node.child_by_field_name("right");

    if let (Some(annotation), Some(target)) = (node.child_by_field_name("type"), left) {
        return Stmt::Annotated(AnnotatedDecl {
            target: lower_expr(base, target),
            annotation: lower_expr(base, annotation),
            value: right.map(|value| lower_expr(base, value)),
            line,
        });
    }

    // Chained assignments nest to the right: `a = (b = value)`
    let mut targets: Vec<Expr> = left.map(|target| lower_expr(base, target)).into_iter().collect();
    let mut value = right;
    while let Some(inner) = value.filter(|candidate| candidate.kind() == "assignment") {
        targets.extend(
            inner
                .child_by_field_name("left")
                .map(|target| lower_expr(base, target)),
        );
        value = inner.child_by_field_name("right");
    }

    Stmt::Assign(PlainAssign {
        targets,
        value: value.map(|value| lower_expr(base, value)),
        line,
    })
}

/// Lower an annotation or assignment target expression
fn lower_expr(base: &BaseExtractor, node: Node) -> Expr {
    match node.kind() {
        "identifier" => Expr::name(base.get_node_text(&node)),
        "none" => Expr::NoneLiteral,
        "type" | "parenthesized_expression" => match base.named_children(&node).as_slice() {
            [inner] => lower_expr(base, *inner),
            _ => other(base, node),
        },
        "attribute" => match (
            node.child_by_field_name("object"),
            node.child_by_field_name("attribute"),
        ) {
            (Some(object), Some(attribute)) => {
                Expr::attribute(lower_expr(base, object), base.get_node_text(&attribute))
            }
            _ => other(base, node),
        },
        "member_type" => match base.named_children(&node).as_slice() {
            [object, attribute] => {
                Expr::attribute(lower_expr(base, *object), base.get_node_text(attribute))
            }
            _ => other(base, node),
        },
        "subscript" => match node.child_by_field_name("value") {
            Some(head) => {
                let mut cursor = node.walk();
                let slots = node
                    .children_by_field_name("subscript", &mut cursor)
                    .map(|slot| lower_expr(base, slot))
                    .collect();
                Expr::subscript(lower_expr(base, head), slots)
            }
            None => other(base, node),
        },
        "generic_type" => {
            let children = base.named_children(&node);
            match children.as_slice() {
                [head, parameters] if parameters.kind() == "type_parameter" => {
                    let slots = base
                        .named_children(parameters)
                        .into_iter()
                        .map(|slot| lower_expr(base, slot))
                        .collect();
                    Expr::subscript(lower_expr(base, *head), slots)
                }
                _ => other(base, node),
            }
        }
        "union_type" => match base.named_children(&node).as_slice() {
            [left, right] => Expr::or(lower_expr(base, *left), lower_expr(base, *right)),
            _ => other(base, node),
        },
        "binary_operator" => {
            let operator = node.child_by_field_name("operator").map(|op| op.kind());
            match (
                operator,
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) {
                (Some("|"), Some(left), Some(right)) => {
                    Expr::or(lower_expr(base, left), lower_expr(base, right))
                }
                _ => other(base, node),
            }
        }
        "tuple" | "tuple_pattern" | "pattern_list" | "expression_list" | "list_pattern"
        | "list" => Expr::tuple(
            base.named_children(&node)
                .into_iter()
                .map(|element| lower_expr(base, element))
                .collect(),
        ),
        "list_splat" | "list_splat_pattern" => match base.named_children(&node).as_slice() {
            [inner] => Expr::Starred {
                inner: Box::new(lower_expr(base, *inner)),
            },
            _ => other(base, node),
        },
        _ => other(base, node),
    }
}

fn other(base: &BaseExtractor, node: Node) -> Expr {
    Expr::other(node.kind(), base.get_node_text(&node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::ExtractionConfig;
    use tree_sitter::Parser;

    fn lower(source: &str) -> Vec<Stmt> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("Error loading Python grammar");
        let tree = parser.parse(source, None).expect("Error parsing source");
        let extractor = PythonExtractor::new(
            "test.py".to_string(),
            source.to_string(),
            ExtractionConfig::default(),
        );
        lower_module(&extractor, tree.root_node())
    }

    fn only_class(stmts: &[Stmt]) -> &ClassDecl {
        match stmts {
            [Stmt::Class(class)] => class,
            other => panic!("expected a single class, got {:?}", other),
        }
    }

    fn annotation_of(source: &str) -> Expr {
        match lower(source).as_slice() {
            [Stmt::Annotated(decl)] => decl.annotation.clone(),
            other => panic!("expected an annotated declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_annotation_shapes() {
        assert_eq!(
            annotation_of("x: list[tuple[int, str]]\n").to_string(),
            "list[tuple[int, str]]"
        );
        assert_eq!(annotation_of("x: int | None\n").to_string(), "int | None");
        assert_eq!(annotation_of("x: None\n"), Expr::NoneLiteral);
        assert_eq!(
            annotation_of("x: dict[str, set[Person]]\n"),
            Expr::subscript(
                Expr::name("dict"),
                vec![
                    Expr::name("str"),
                    Expr::subscript(Expr::name("set"), vec![Expr::name("Person")]),
                ]
            )
        );
        assert!(matches!(
            annotation_of("x: datetime.date\n"),
            Expr::Attribute { .. }
        ));
    }

    #[test]
    fn test_class_with_decorators_bases_and_members() {
        let source = r#"
@dataclasses.dataclass(frozen=True)
class Point(Base, abc.ABC, metaclass=Meta):
    """A point."""
    x: float = 0.0

    async def norm(self, *args, scale: float = 1.0, **kwargs) -> float:
        return 0.0
"#;
        let stmts = lower(source);
        let class = only_class(&stmts);

        assert_eq!(class.name, "Point");
        assert_eq!(class.line, 3);
        assert_eq!(
            class.decorators,
            vec![Expr::attribute(Expr::name("dataclasses"), "dataclass")]
        );
        assert_eq!(class.bases.len(), 2);
        assert_eq!(class.bases[0], Expr::name("Base"));

        assert!(matches!(class.body[0], Stmt::Other { .. }), "docstring first");
        assert!(matches!(class.body[1], Stmt::Annotated(_)));
        let Stmt::Function(norm) = &class.body[2] else {
            panic!("expected method, got {:?}", class.body[2]);
        };
        assert!(norm.is_async);
        let kinds: Vec<(&str, ParamKind)> = norm
            .params
            .iter()
            .map(|param| (param.name.as_str(), param.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("self", ParamKind::Regular),
                ("args", ParamKind::VarPositional),
                ("scale", ParamKind::Regular),
                ("kwargs", ParamKind::VarKeyword),
            ]
        );
        assert_eq!(norm.params[2].annotation, Some(Expr::name("float")));
        assert_eq!(norm.returns, Some(Expr::name("float")));
    }

    #[test]
    fn test_assignments_and_destructuring() {
        let source = r#"
class Pair:
    def __init__(self, data):
        self.a = self.b = data
        (self.first, (self.second, self.third)) = data
        self.count: int = 0
        self.count += 1
"#;
        let stmts = lower(source);
        let class = only_class(&stmts);
        let Stmt::Function(init) = &class.body[0] else {
            panic!("expected __init__");
        };

        let Stmt::Assign(chained) = &init.body[0] else {
            panic!("expected assignment, got {:?}", init.body[0]);
        };
        assert_eq!(chained.targets.len(), 2);
        assert_eq!(chained.targets[1].to_string(), "self.b");

        let Stmt::Assign(destructured) = &init.body[1] else {
            panic!("expected destructuring, got {:?}", init.body[1]);
        };
        assert_eq!(
            destructured.targets[0].to_string(),
            "(self.first, (self.second, self.third))"
        );

        assert!(matches!(init.body[2], Stmt::Annotated(_)));
        assert!(
            matches!(&init.body[3], Stmt::Other { kind, .. } if kind == "augmented_assignment")
        );
    }

    #[test]
    fn test_compound_statements_become_blocks() {
        let source = r#"
def setup(self, flag):
    if flag:
        self.a = 1
    else:
        self.b = 2
    for item in range(3):
        pass
    # trailing comment
"#;
        let stmts = lower(source);
        let [Stmt::Function(setup)] = stmts.as_slice() else {
            panic!("expected a function, got {:?}", stmts);
        };

        assert_eq!(setup.body.len(), 2, "comments are dropped");
        let Stmt::Block { body } = &setup.body[0] else {
            panic!("expected block, got {:?}", setup.body[0]);
        };
        assert_eq!(body.len(), 2, "both branches flattened");
        assert!(body.iter().all(|stmt| matches!(stmt, Stmt::Assign(_))));
    }
}
