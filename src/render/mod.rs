//! Model renderers
//!
//! Read-only views over extracted models: a plain-text report, TypeScript
//! interfaces, a Mermaid class diagram and JSON. None of them looks at source
//! syntax again.

pub mod mermaid;
pub mod text;
pub mod typescript;
pub mod writer;

use crate::extractors::base::{ExtractError, ExtractionResults};
use std::fmt;
use std::str::FromStr;

pub use writer::write_output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    TypeScript,
    Mermaid,
    Json,
}

impl OutputFormat {
    /// Conventional file extension for the format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::TypeScript => "ts",
            OutputFormat::Mermaid => "mmd",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "typescript" | "ts" => Ok(OutputFormat::TypeScript),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ExtractError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::TypeScript => "typescript",
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Render results in the requested format
pub fn render(results: &ExtractionResults, format: OutputFormat) -> Result<String, ExtractError> {
    let output = match format {
        OutputFormat::Text => text::render_text(results),
        OutputFormat::TypeScript => typescript::render_typescript(results),
        OutputFormat::Mermaid => mermaid::render_mermaid(results),
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
    };
    Ok(output)
}
