//! Conversion between tangle-core types and tower_lsp::lsp_types.

use tower_lsp::lsp_types::{
    Diagnostic as LspDiagnostic, DiagnosticSeverity as LspSeverity, NumberOrString,
    Position as LspPosition, Range as LspRange,
};

use tangle_core::{Diagnostic, DiagnosticCode, DiagnosticSeverity, Position, Range};

/// Convert a tangle-core Position to an lsp-types Position.
pub fn position_to_lsp(pos: &Position) -> LspPosition {
    LspPosition {
        line: pos.line,
        character: pos.character,
    }
}

/// Convert a tangle-core Range to an lsp-types Range.
pub fn range_to_lsp(range: &Range) -> LspRange {
    LspRange {
        start: position_to_lsp(&range.start),
        end: position_to_lsp(&range.end),
    }
}

/// Convert a tangle-core DiagnosticSeverity to an lsp-types DiagnosticSeverity.
pub fn severity_to_lsp(severity: &DiagnosticSeverity) -> LspSeverity {
    match severity {
        DiagnosticSeverity::Error => LspSeverity::ERROR,
        DiagnosticSeverity::Warning => LspSeverity::WARNING,
        DiagnosticSeverity::Information => LspSeverity::INFORMATION,
    }
}

/// Convert a tangle-core DiagnosticCode to an lsp-types code.
///
/// LSP numeric codes are i32; the rare engine code outside that range is
/// carried as its decimal string instead of being dropped.
pub fn code_to_lsp(code: &DiagnosticCode) -> NumberOrString {
    match code {
        DiagnosticCode::Number(n) => i32::try_from(*n)
            .map(NumberOrString::Number)
            .unwrap_or_else(|_| NumberOrString::String(n.to_string())),
        DiagnosticCode::Text(s) => NumberOrString::String(s.clone()),
    }
}

/// Convert a tangle-core Diagnostic to an lsp-types Diagnostic.
pub fn diagnostic_to_lsp(diag: &Diagnostic) -> LspDiagnostic {
    LspDiagnostic {
        range: range_to_lsp(&diag.range),
        severity: Some(severity_to_lsp(&diag.severity)),
        code: diag.code.as_ref().map(code_to_lsp),
        code_description: None,
        source: Some(diag.source.clone()),
        message: diag.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_conversion() {
        let core_pos = Position::new(10, 5);
        let lsp_pos = position_to_lsp(&core_pos);
        assert_eq!(lsp_pos.line, 10);
        assert_eq!(lsp_pos.character, 5);
    }

    #[test]
    fn test_range_conversion() {
        let core_range = Range::new(Position::new(0, 0), Position::new(0, 10));
        let lsp_range = range_to_lsp(&core_range);
        assert_eq!(lsp_range.start.line, 0);
        assert_eq!(lsp_range.start.character, 0);
        assert_eq!(lsp_range.end.line, 0);
        assert_eq!(lsp_range.end.character, 10);
    }

    #[test]
    fn test_severity_conversion() {
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Error),
            LspSeverity::ERROR
        );
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Warning),
            LspSeverity::WARNING
        );
        assert_eq!(
            severity_to_lsp(&DiagnosticSeverity::Information),
            LspSeverity::INFORMATION
        );
    }

    #[test]
    fn test_code_conversion() {
        assert_eq!(
            code_to_lsp(&DiagnosticCode::Number(2322)),
            NumberOrString::Number(2322)
        );
        assert_eq!(
            code_to_lsp(&DiagnosticCode::Text("no-shadow".to_string())),
            NumberOrString::String("no-shadow".to_string())
        );
        // Out-of-range numeric codes survive as strings
        assert_eq!(
            code_to_lsp(&DiagnosticCode::Number(i64::MAX)),
            NumberOrString::String(i64::MAX.to_string())
        );
    }

    #[test]
    fn test_diagnostic_conversion() {
        let core_diag = Diagnostic::new(
            Range::new(Position::new(2, 22), Position::new(2, 25)),
            DiagnosticSeverity::Error,
            "Type 'string' is not assignable to type 'number'.",
        )
        .with_code(2322);

        let lsp_diag = diagnostic_to_lsp(&core_diag);
        assert_eq!(
            lsp_diag.message,
            "Type 'string' is not assignable to type 'number'."
        );
        assert_eq!(lsp_diag.severity, Some(LspSeverity::ERROR));
        assert_eq!(lsp_diag.code, Some(NumberOrString::Number(2322)));
        assert_eq!(lsp_diag.source.as_deref(), Some("typescript (in yaml)"));
        assert_eq!(lsp_diag.range.start.line, 2);
        assert_eq!(lsp_diag.range.start.character, 22);
    }

    #[test]
    fn test_diagnostic_without_code() {
        let core_diag = Diagnostic::new(
            Range::new(Position::new(0, 0), Position::new(0, 1)),
            DiagnosticSeverity::Warning,
            "no code attached",
        );
        let lsp_diag = diagnostic_to_lsp(&core_diag);
        assert_eq!(lsp_diag.code, None);
    }
}
