// BaseExtractor
//
// Per-file state shared by language front ends: the file path used in
// diagnostics and the source text that tree-sitter node ranges index into.

use tree_sitter::Node;

use super::config::ExtractionConfig;
use super::diagnostics::Diagnostics;

/// Base implementation for language extractors
pub struct BaseExtractor {
    pub language: String,
    pub file_path: String,
    pub content: String,
    pub diagnostics: Diagnostics,
    pub config: ExtractionConfig,
}

impl BaseExtractor {
    pub fn new(
        language: String,
        file_path: String,
        content: String,
        config: ExtractionConfig,
    ) -> Self {
        // Normalize Windows separators
        let file_path = file_path.replace('\\', "/");
        Self {
            language,
            diagnostics: Diagnostics::new(file_path.clone()),
            file_path,
            content,
            config,
        }
    }

    /// Source text covered by a node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// 1-based line a node starts on
    pub fn line_of(node: &Node) -> u32 {
        node.start_position().row as u32 + 1
    }

    /// Hand the collected diagnostics to the caller, leaving an empty sink behind
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::replace(&mut self.diagnostics, Diagnostics::new(self.file_path.clone()))
    }
}
