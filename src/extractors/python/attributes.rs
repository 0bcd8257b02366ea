// Attribute collection
//
// Fields come either from the leading run of annotated declarations in a
// dataclass body or from receiver stores inside the initializer. Every discovery
// goes through `AttributeSet::merge`, so names stay unique and a typed occurrence
// always beats an untyped one.

use super::signatures::implicit_receiver;
use super::type_hints::resolve_at_site;
use super::ModelBuilder;
use crate::extractors::base::{
    Attribute, DiagnosticKind, Expr, FunctionDecl, Scope, Stmt, TypeHint,
};

/// What happened when an occurrence was merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First time the name was seen
    Added,
    /// An `Undefined` entry took the incoming resolved type
    Upgraded,
    /// Nothing to change (same type, or the incoming occurrence is untyped)
    Kept,
    /// Both occurrences are resolved and differ; the first one is kept
    Conflict { kept: TypeHint, rejected: TypeHint },
}

#[derive(Debug, Clone)]
struct Field {
    attribute: Attribute,
    line: u32,
    annotated: bool,
}

/// Ordered, name-unique attribute list
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    fields: Vec<Field>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one occurrence, keeping first-discovery order
    pub fn merge(&mut self, candidate: Attribute) -> MergeOutcome {
        let annotated = !candidate.type_hint.is_undefined();
        self.merge_at(candidate, 0, annotated)
    }

    fn merge_at(&mut self, candidate: Attribute, line: u32, annotated: bool) -> MergeOutcome {
        let Some(index) = self
            .fields
            .iter()
            .position(|field| field.attribute.name == candidate.name)
        else {
            self.fields.push(Field {
                attribute: candidate,
                line,
                annotated,
            });
            return MergeOutcome::Added;
        };

        let existing = &mut self.fields[index];
        existing.annotated |= annotated;
        let current = &mut existing.attribute.type_hint;
        if candidate.type_hint.is_undefined() || *current == candidate.type_hint {
            MergeOutcome::Kept
        } else if current.is_undefined() {
            *current = candidate.type_hint;
            MergeOutcome::Upgraded
        } else {
            MergeOutcome::Conflict {
                kept: current.clone(),
                rejected: candidate.type_hint,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.fields
            .iter()
            .map(|field| &field.attribute)
            .find(|attribute| attribute.name == name)
    }

    /// Fields that never had an annotation written, with their first line
    fn unannotated(&self) -> impl Iterator<Item = (&str, u32)> {
        self.fields
            .iter()
            .filter(|field| !field.annotated && field.attribute.type_hint.is_undefined())
            .map(|field| (field.attribute.name.as_str(), field.line))
    }

    pub fn into_attributes(self) -> Vec<Attribute> {
        self.fields.into_iter().map(|field| field.attribute).collect()
    }
}

/// Merge and report a conflict against `scope`
fn merge_reporting(
    builder: &mut ModelBuilder<'_>,
    fields: &mut AttributeSet,
    candidate: Attribute,
    annotated: bool,
    scope: &Scope<'_>,
    line: u32,
) {
    let name = candidate.name.clone();
    if let MergeOutcome::Conflict { kept, rejected } = fields.merge_at(candidate, line, annotated) {
        builder.report(
            DiagnosticKind::TypeConflict,
            scope,
            line,
            format!(
                "attribute '{}' declared as {} and {}; keeping {}",
                name, kept, rejected, kept
            ),
        );
    }
}

fn report_unannotated(builder: &mut ModelBuilder<'_>, fields: &AttributeSet, scope: &Scope<'_>) {
    if !builder.config().require_annotations {
        return;
    }
    for (name, line) in fields.unannotated() {
        builder.report(
            DiagnosticKind::MissingAnnotation,
            scope,
            line,
            format!("attribute '{}' has no type annotation", name),
        );
    }
}

/// Dataclass mode: the contiguous leading run of `name: T [= v]` declarations
///
/// Returns the attributes and how many body statements were consumed. The first
/// statement of any other shape ends the scan for good.
pub fn collect_dataclass_fields(
    builder: &mut ModelBuilder<'_>,
    body: &[Stmt],
    scope: &Scope<'_>,
) -> (Vec<Attribute>, usize) {
    let mut fields = AttributeSet::new();
    let mut consumed = 0;

    for stmt in body {
        let Stmt::Annotated(decl) = stmt else {
            break;
        };
        let Some(name) = decl.target.as_name() else {
            break;
        };

        let type_hint = resolve_at_site(builder, Some(&decl.annotation), scope, decl.line);
        merge_reporting(
            builder,
            &mut fields,
            Attribute::new(name, type_hint),
            true,
            scope,
            decl.line,
        );
        consumed += 1;
    }

    report_unannotated(builder, &fields, scope);
    (fields.into_attributes(), consumed)
}

/// Constructor mode: receiver stores anywhere inside the initializer body
///
/// `scope` is the initializer's own scope. Nested blocks and nested functions are
/// searched; nested classes are a boundary and never entered.
pub fn collect_constructor_fields(
    builder: &mut ModelBuilder<'_>,
    initializer: &FunctionDecl,
    scope: &Scope<'_>,
) -> Vec<Attribute> {
    let receiver = implicit_receiver(&initializer.params)
        .map(|param| param.name.as_str())
        .unwrap_or(builder.config().default_receiver.as_str());

    let mut fields = AttributeSet::new();
    collect_from_block(builder, &initializer.body, receiver, &mut fields, scope);
    report_unannotated(builder, &fields, scope);
    fields.into_attributes()
}

fn collect_from_block(
    builder: &mut ModelBuilder<'_>,
    stmts: &[Stmt],
    receiver: &str,
    fields: &mut AttributeSet,
    scope: &Scope<'_>,
) {
    for stmt in stmts {
        match stmt {
            Stmt::Annotated(decl) => {
                if let Some(name) = receiver_field(&decl.target, receiver) {
                    let type_hint =
                        resolve_at_site(builder, Some(&decl.annotation), scope, decl.line);
                    merge_reporting(
                        builder,
                        fields,
                        Attribute::new(name, type_hint),
                        true,
                        scope,
                        decl.line,
                    );
                }
            }
            Stmt::Assign(assign) => {
                for target in &assign.targets {
                    let mut names = Vec::new();
                    store_targets(builder, target, receiver, &mut names, scope, assign.line);
                    for name in names {
                        merge_reporting(
                            builder,
                            fields,
                            Attribute::new(name, TypeHint::Undefined),
                            false,
                            scope,
                            assign.line,
                        );
                    }
                }
            }
            Stmt::Block { body } => collect_from_block(builder, body, receiver, fields, scope),
            Stmt::Function(function) => {
                let inner = scope.child(&function.name);
                collect_from_block(builder, &function.body, receiver, fields, &inner);
            }
            Stmt::Class(_) | Stmt::Other { .. } => {}
        }
    }
}

/// `receiver.name` as a store target
fn receiver_field<'e>(target: &'e Expr, receiver: &str) -> Option<&'e str> {
    match target {
        Expr::Attribute { value, attr } if value.as_name() == Some(receiver) => {
            Some(attr.as_str())
        }
        _ => None,
    }
}

/// Receiver fields written by one assignment target, destructuring as needed
fn store_targets<'e>(
    builder: &mut ModelBuilder<'_>,
    target: &'e Expr,
    receiver: &str,
    names: &mut Vec<&'e str>,
    scope: &Scope<'_>,
    line: u32,
) {
    match target {
        Expr::Tuple { elements } => {
            for element in elements {
                store_targets(builder, element, receiver, names, scope, line);
            }
        }
        Expr::Starred { inner } => store_targets(builder, inner, receiver, names, scope, line),
        Expr::Attribute { .. } => {
            if let Some(name) = receiver_field(target, receiver) {
                names.push(name);
            }
        }
        // Locals and item stores (`self.items[0] = x` reads the field) declare nothing
        Expr::Name { .. } | Expr::Subscript { .. } => {}
        Expr::NoneLiteral | Expr::BinaryOr { .. } | Expr::Other { .. } => {
            builder.report(
                DiagnosticKind::StructuralUnsupported,
                scope,
                line,
                format!("unsupported assignment target `{}`", target),
            );
        }
    }
}
