// Python model extractor
//
// This module is organized into focused sub-modules:
// - lowering: tree-sitter CST to declaration tree
// - type_hints: annotation resolution
// - attributes: dataclass fields and initializer stores
// - signatures: parameters and return types
// - decorators: dataclass marker detection
// - classes: recursive class/function model building

pub(crate) mod attributes;
pub(crate) mod classes;
pub(crate) mod decorators;
pub(crate) mod lowering;
pub(crate) mod signatures;
pub(crate) mod type_hints;

pub use attributes::{AttributeSet, MergeOutcome};
pub use signatures::{access_marker, with_access_marker};
pub use type_hints::{resolve_annotation, ResolveError};

use crate::extractors::base::{
    BaseExtractor, DiagnosticKind, Diagnostics, ExtractionConfig, ExtractionResults, Scope, Stmt,
};
use tracing::debug;
use tree_sitter::Tree;

/// Shared state for one model-building pass: read-only configuration and the
/// diagnostics sink of the file being built
pub struct ModelBuilder<'a> {
    config: &'a ExtractionConfig,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a ExtractionConfig, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &'a ExtractionConfig {
        self.config
    }

    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        scope: &Scope<'_>,
        line: u32,
        message: impl Into<String>,
    ) {
        self.diagnostics.record(kind, scope, line, message);
    }
}

/// Build the models of one file from an already-lowered declaration tree
///
/// Pure over its inputs: the same statements and configuration always give an
/// equal result.
pub fn build_models(stmts: &[Stmt], file_path: &str, config: &ExtractionConfig) -> ExtractionResults {
    let mut diagnostics = Diagnostics::new(file_path);
    let members = {
        let mut builder = ModelBuilder::new(config, &mut diagnostics);
        classes::build_module(&mut builder, stmts)
    };

    ExtractionResults {
        file_path: file_path.to_string(),
        classes: members.classes,
        functions: members.functions,
        diagnostics: diagnostics.into_vec(),
    }
}

/// Python extractor: lowers a parsed file and builds its class and function models
pub struct PythonExtractor {
    base: BaseExtractor,
}

impl PythonExtractor {
    pub fn new(file_path: String, content: String, config: ExtractionConfig) -> Self {
        Self {
            base: BaseExtractor::new("python".to_string(), file_path, content, config),
        }
    }

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }

    /// Lower the tree into declaration statements without building models
    pub fn lower(&self, tree: &Tree) -> Vec<Stmt> {
        lowering::lower_module(self, tree.root_node())
    }

    /// Extract the class and function models of the file
    pub fn extract_models(&mut self, tree: &Tree) -> ExtractionResults {
        let root = tree.root_node();
        if let Some(error) = self.base.first_error(&root) {
            let line = BaseExtractor::line_of(&error);
            let text = self.base.get_node_text(&error);
            let message = format!(
                "syntax error near `{}`; extraction continues on the recovered tree",
                text.lines().next().unwrap_or_default()
            );
            self.base
                .diagnostics
                .record(DiagnosticKind::SyntaxError, &Scope::root(), line, message);
        }

        let stmts = self.lower(tree);
        let members = {
            let mut builder = ModelBuilder::new(&self.base.config, &mut self.base.diagnostics);
            classes::build_module(&mut builder, &stmts)
        };

        debug!(
            "Extracted {} classes and {} functions from {}",
            members.classes.len(),
            members.functions.len(),
            self.base.file_path
        );

        ExtractionResults {
            file_path: self.base.file_path.clone(),
            classes: members.classes,
            functions: members.functions,
            diagnostics: self.base.take_diagnostics().into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{Attribute, FunctionModel, Parameter, TypeHint};
    use tree_sitter::Parser;

    fn extract(source: &str) -> ExtractionResults {
        extract_with(source, ExtractionConfig::default())
    }

    fn extract_with(source: &str, config: ExtractionConfig) -> ExtractionResults {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("Error loading Python grammar");
        let tree = parser.parse(source, None).expect("Error parsing source");
        let mut extractor = PythonExtractor::new("models.py".to_string(), source.to_string(), config);
        extractor.extract_models(&tree)
    }

    #[test]
    fn test_person_from_source() {
        let source = r#"
class Person:
    def __init__(self, name: str):
        self.name: str = name

    def greet(self):
        print(f"Hello, {self.name}")
"#;
        let results = extract(source);

        assert_eq!(results.file_path, "models.py");
        assert_eq!(results.classes.len(), 1);
        let person = &results.classes[0];
        assert_eq!(person.name, "Person");
        assert!(!person.is_dataclass);
        assert!(person.inherits_from.is_empty());
        assert_eq!(person.attributes, vec![Attribute::new("name", TypeHint::String)]);
        assert_eq!(
            person.functions,
            vec![FunctionModel::new("greet", vec![], TypeHint::Undefined)]
        );
        assert!(results.diagnostics.is_empty(), "{:?}", results.diagnostics);
    }

    #[test]
    fn test_dataclass_prefix_from_source() {
        let source = r#"
from dataclasses import dataclass, field

@dataclass
class Employee(Person):
    employee_id: int
    salary: float = 0.0
    skills: list[str] = field(default_factory=list)
    manager: Employee | None = None

    def raise_salary(self, percent: float) -> None:
        self.salary *= 1 + percent / 100

    bonus: float = 0.0
"#;
        let results = extract(source);
        let employee = &results.classes[0];

        assert!(employee.is_dataclass);
        assert_eq!(employee.inherits_from, vec!["Person"]);
        let fields: Vec<(&str, String)> = employee
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a.type_hint.to_string()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("employee_id", "int".to_string()),
                ("salary", "float".to_string()),
                ("skills", "list[str]".to_string()),
                ("manager", "Employee | None".to_string()),
            ]
        );
        assert_eq!(
            employee.functions,
            vec![FunctionModel::new(
                "raise_salary",
                vec![Parameter::new("percent", TypeHint::Float)],
                TypeHint::NoneType
            )]
        );
        assert!(results.diagnostics.is_empty(), "{:?}", results.diagnostics);
    }

    #[test]
    fn test_constructor_scan_from_source() {
        let source = r#"
class Account(Base):
    class Meta:
        def __init__(self):
            self.table = "accounts"

    def __init__(self, owner, balance: float = 0.0):
        self.x: int = 0
        self.y = 1
        if balance > 0:
            self.owner, (self.balance, self.history) = owner, (balance, [])
        self.y: str = "changed"
        self.x: str = "conflict"
        audit(self.owner)

    def deposit(self, amount: float) -> bool:
        def log(message: str) -> None:
            pass
        return True
"#;
        let results = extract(source);
        let account = &results.classes[0];

        let fields: Vec<(&str, TypeHint)> = account
            .attributes
            .iter()
            .map(|a| (a.name.as_str(), a.type_hint.clone()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("x", TypeHint::Integer),
                ("y", TypeHint::String),
                ("owner", TypeHint::Undefined),
                ("balance", TypeHint::Undefined),
                ("history", TypeHint::Undefined),
            ]
        );

        assert_eq!(account.nested_classes.len(), 1);
        assert_eq!(
            account.nested_classes[0].attributes,
            vec![Attribute::new("table", TypeHint::Undefined)]
        );

        assert_eq!(account.functions.len(), 1);
        let deposit = &account.functions[0];
        assert_eq!(deposit.return_type, TypeHint::Boolean);
        assert_eq!(deposit.nested_functions[0].name, "log");

        assert_eq!(results.diagnostics.len(), 1);
        assert_eq!(results.diagnostics[0].kind, DiagnosticKind::TypeConflict);
        assert_eq!(results.diagnostics[0].scope, "Account.__init__");
    }

    #[test]
    fn test_module_functions_and_diagnostics() {
        let source = r#"
class Registry:
    pass

def load(path: str, strict: bool = False) -> dict[str, Registry]:
    return {}

def broken(value: Mapping[str, int]) -> list[int, str]:
    pass
"#;
        let results = extract(source);

        assert_eq!(results.classes.len(), 1);
        assert_eq!(results.functions.len(), 2);
        assert_eq!(
            results.functions[0].return_type.to_string(),
            "dict[str, Registry]"
        );
        assert_eq!(results.functions[1].parameters[0].type_hint, TypeHint::Undefined);

        let kinds: Vec<DiagnosticKind> = results.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MissingInitializer,
                DiagnosticKind::UnresolvedContainer,
                DiagnosticKind::StructuralUnsupported,
            ]
        );
    }

    #[test]
    fn test_receiver_depends_on_position_and_decorators() {
        let source = r#"
class Vector:
    def __init__(this, x: float):
        this.x: float = x

    def scale(this, factor: int) -> "Vector":
        return this

    @staticmethod
    def zero(dims: int) -> None:
        pass

    @classmethod
    def unit(cls, axis: int):
        pass

def register(cls, name: str):
    pass
"#;
        let results = extract(source);
        let names = |function: &FunctionModel| -> Vec<String> {
            function.parameters.iter().map(|p| p.name.clone()).collect()
        };

        let vector = &results.classes[0];
        assert_eq!(vector.attributes, vec![Attribute::new("x", TypeHint::Float)]);
        assert_eq!(names(vector.function("scale").unwrap()), vec!["factor"]);
        assert_eq!(names(vector.function("zero").unwrap()), vec!["dims"]);
        assert_eq!(names(vector.function("unit").unwrap()), vec!["axis"]);
        assert_eq!(names(&results.functions[0]), vec!["cls", "name"]);
    }

    #[test]
    fn test_syntax_error_is_recorded_and_extraction_continues() {
        let source = "class Good:\n    def __init__(self):\n        self.ok = 1\n\ndef broken(:\n";
        let results = extract(source);

        assert!(results
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::SyntaxError));
        assert!(results.classes.iter().any(|class| class.name == "Good"));
    }

    #[test]
    fn test_extraction_is_idempotent_and_matches_pure_builder() {
        let source = "class A:\n    def __init__(self):\n        self.items: list[int] = []\n";
        let first = extract(source);
        let second = extract(source);
        assert_eq!(first, second);

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        let extractor = PythonExtractor::new(
            "models.py".to_string(),
            source.to_string(),
            ExtractionConfig::default(),
        );
        let stmts = extractor.lower(&tree);
        assert_eq!(
            build_models(&stmts, "models.py", &ExtractionConfig::default()),
            first
        );
    }
}
