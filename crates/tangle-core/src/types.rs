//! Diagnostic and position types in host-document coordinates.
//!
//! These types are transport-agnostic: no LSP protocol dependencies, easily
//! serializable to JSON, easily convertible to `lsp-types`. All positions use
//! 0-based line and character indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance tag stamped into the `source` field of every translated
/// diagnostic, so editors show where a squiggle in the host document
/// actually came from.
pub const PROVENANCE: &str = "typescript (in yaml)";

/// A position in a text document, expressed as zero-based line and character
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset within the line.
    pub character: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

/// A range in a text document, start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    /// The range's start position (inclusive).
    pub start: Position,
    /// The range's end position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range spanning a single position (zero-width).
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Check if this range contains a position.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if this range is empty (zero-width).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Reports an error.
    Error = 1,
    /// Reports a warning.
    Warning = 2,
    /// Reports an information.
    Information = 3,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => f.write_str("error"),
            DiagnosticSeverity::Warning => f.write_str("warning"),
            DiagnosticSeverity::Information => f.write_str("information"),
        }
    }
}

/// A diagnostic code as reported by an analysis engine.
///
/// TypeScript tooling reports numeric codes (`2322`); other engines use
/// strings. Both survive translation verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagnosticCode {
    /// A numeric code.
    Number(i64),
    /// A string code.
    Text(String),
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::Number(code) => write!(f, "{code}"),
            DiagnosticCode::Text(code) => f.write_str(code),
        }
    }
}

impl From<i64> for DiagnosticCode {
    fn from(code: i64) -> Self {
        DiagnosticCode::Number(code)
    }
}

impl From<&str> for DiagnosticCode {
    fn from(code: &str) -> Self {
        DiagnosticCode::Text(code.to_string())
    }
}

impl From<String> for DiagnosticCode {
    fn from(code: String) -> Self {
        DiagnosticCode::Text(code)
    }
}

/// A diagnostic message in host-document coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The range at which the diagnostic applies.
    pub range: Range,
    /// The diagnostic's severity.
    pub severity: DiagnosticSeverity,
    /// The diagnostic's code, which might appear in the user interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<DiagnosticCode>,
    /// Where this diagnostic came from; always the provenance tag.
    pub source: String,
    /// The diagnostic's message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic with the provenance tag stamped in.
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            code: None,
            source: PROVENANCE.to_string(),
            message: message.into(),
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<DiagnosticCode>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ordering() {
        let p1 = Position::new(0, 5);
        let p2 = Position::new(0, 10);
        let p3 = Position::new(1, 0);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
    }

    #[test]
    fn range_contains() {
        let range = Range::new(Position::new(1, 0), Position::new(1, 10));

        assert!(range.contains(Position::new(1, 0)));
        assert!(range.contains(Position::new(1, 5)));
        assert!(!range.contains(Position::new(1, 10))); // End is exclusive
        assert!(!range.contains(Position::new(0, 5)));
        assert!(!range.contains(Position::new(2, 0)));
    }

    #[test]
    fn diagnostic_carries_provenance() {
        let diag = Diagnostic::new(
            Range::new(Position::new(2, 22), Position::new(2, 25)),
            DiagnosticSeverity::Error,
            "Type 'string' is not assignable to type 'number'.",
        );
        assert_eq!(diag.source, "typescript (in yaml)");
        assert_eq!(diag.code, None);
    }

    #[test]
    fn diagnostic_serialization() {
        let diag = Diagnostic::new(
            Range::new(Position::new(0, 0), Position::new(0, 10)),
            DiagnosticSeverity::Error,
            "Test error",
        )
        .with_code(2322);

        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"error\""));
        assert!(json.contains("\"code\":2322"));
        assert!(json.contains("\"source\":\"typescript (in yaml)\""));
    }

    #[test]
    fn diagnostic_code_omitted_when_absent() {
        let diag = Diagnostic::new(
            Range::point(Position::new(0, 0)),
            DiagnosticSeverity::Warning,
            "no code here",
        );
        let json = serde_json::to_string(&diag).unwrap();
        assert!(!json.contains("\"code\""));
    }

    #[test]
    fn diagnostic_code_forms() {
        assert_eq!(DiagnosticCode::from(2322).to_string(), "2322");
        assert_eq!(DiagnosticCode::from("TS-STYLE").to_string(), "TS-STYLE");

        let number: DiagnosticCode = serde_json::from_str("1005").unwrap();
        assert_eq!(number, DiagnosticCode::Number(1005));
        let text: DiagnosticCode = serde_json::from_str("\"no-shadow\"").unwrap();
        assert_eq!(text, DiagnosticCode::Text("no-shadow".to_string()));
    }
}
