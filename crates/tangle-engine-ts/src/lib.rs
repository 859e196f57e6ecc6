//! Built-in syntax-level TypeScript engine.
//!
//! Parses each virtual document with `tree-sitter-typescript` and reports
//! ERROR and missing nodes as error diagnostics, so the shipped binary
//! produces real results without an external language service. Richer
//! engines (a tsserver bridge, say) implement the same
//! [`AnalysisEngine`] trait and slot in unchanged.

use tangle_core::{
    AnalysisEngine, ContentProvider, EngineDiagnostic, EngineError, Position, Range,
};
use tracing::debug;
use tree_sitter::{Node, Parser};

/// Syntax checker for TypeScript fragments.
pub struct TsSyntaxEngine {
    parser: Parser,
}

impl TsSyntaxEngine {
    /// Create an engine with the TypeScript grammar loaded.
    pub fn new() -> Result<Self, EngineError> {
        let mut parser = Parser::new();
        let language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();
        parser
            .set_language(&language)
            .map_err(|e| EngineError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }
}

impl AnalysisEngine for TsSyntaxEngine {
    fn analyze(
        &mut self,
        uri: &str,
        provider: &dyn ContentProvider,
    ) -> Result<Vec<EngineDiagnostic>, EngineError> {
        let source = provider.provide(uri);
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| EngineError::Analysis {
                uri: uri.to_string(),
                message: "tree-sitter returned no tree".to_string(),
            })?;

        let mut diagnostics = Vec::new();
        collect_errors(tree.root_node(), source.as_bytes(), &mut diagnostics);
        debug!(uri, count = diagnostics.len(), "syntax pass complete");
        Ok(diagnostics)
    }
}

// tree-sitter has no error list of its own; walk the tree and report error
// and missing nodes directly.
fn collect_errors(node: Node<'_>, source: &[u8], diagnostics: &mut Vec<EngineDiagnostic>) {
    if node.is_error() {
        diagnostics.push(unexpected_token(node, source));
        return;
    }
    if node.is_missing() {
        diagnostics.push(expected_node(node));
        return;
    }
    if !node.has_error() {
        // Clean subtree, nothing to visit
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, source, diagnostics);
    }
}

fn unexpected_token(node: Node<'_>, source: &[u8]) -> EngineDiagnostic {
    let text = node.utf8_text(source).unwrap_or("");
    let token = text.split_whitespace().next().unwrap_or("");
    let message = if token.is_empty() {
        "Unexpected token".to_string()
    } else {
        format!("Unexpected token '{}'", clip(token))
    };
    EngineDiagnostic::error(node_range(node), message)
}

fn expected_node(node: Node<'_>) -> EngineDiagnostic {
    EngineDiagnostic::error(node_range(node), format!("'{}' expected", node.kind()))
}

/// Cap the echoed token so one bad paste cannot flood a message.
fn clip(token: &str) -> &str {
    match token.char_indices().nth(20) {
        Some((i, _)) => &token[..i],
        None => token,
    }
}

fn node_range(node: Node<'_>) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        Position::new(start.row as u32, start.column as u32),
        Position::new(end.row as u32, end.column as u32),
    )
}
