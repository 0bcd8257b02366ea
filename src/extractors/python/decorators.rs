// Decorator handling
//
// Only the decorator's simple name matters: `@dataclass`, `@dataclass(frozen=True)`
// and `@dataclasses.dataclass` all name `dataclass`.

use crate::extractors::base::{Expr, ExtractionConfig};

/// Simple name of a decorator expression, if it has one
pub fn decorator_simple_name(decorator: &Expr) -> Option<&str> {
    match decorator {
        Expr::Name { id } => Some(id.as_str()),
        Expr::Attribute { attr, .. } => Some(attr.as_str()),
        // Calls reach the engine as raw text when a provider does not unwrap them
        Expr::Other { text, .. } => {
            let callee = text.trim_start_matches('@').split('(').next()?.trim();
            callee.rsplit('.').next().filter(|name| !name.is_empty())
        }
        _ => None,
    }
}

/// True when any decorator's simple name is a configured dataclass marker
pub fn is_dataclass(decorators: &[Expr], config: &ExtractionConfig) -> bool {
    decorators
        .iter()
        .filter_map(decorator_simple_name)
        .any(|name| config.is_dataclass_marker(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        assert_eq!(decorator_simple_name(&Expr::name("dataclass")), Some("dataclass"));
        assert_eq!(
            decorator_simple_name(&Expr::attribute(Expr::name("dataclasses"), "dataclass")),
            Some("dataclass")
        );
        assert_eq!(
            decorator_simple_name(&Expr::other("call", "dataclasses.dataclass(frozen=True)")),
            Some("dataclass")
        );
        assert_eq!(decorator_simple_name(&Expr::NoneLiteral), None);
    }

    #[test]
    fn test_is_dataclass() {
        let config = ExtractionConfig::default();
        assert!(is_dataclass(
            &[Expr::name("total_ordering"), Expr::name("dataclass")],
            &config
        ));
        assert!(!is_dataclass(&[Expr::name("final")], &config));
        assert!(!is_dataclass(&[], &config));
    }
}
