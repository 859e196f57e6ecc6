//! Translation of engine diagnostics into host-document coordinates.

use tracing::debug;

use crate::engine::EngineDiagnostic;
use crate::fragment::CodeFragment;
use crate::mapper;
use crate::types::Diagnostic;

/// Translate `engine_diagnostics` reported against `fragment` into host
/// coordinates.
///
/// Ranges are mapped endpoint-wise; message, severity and code pass through
/// verbatim; `source` gets the provenance tag. Diagnostics without a
/// position are dropped with a debug log entry, never surfaced and never
/// fatal.
pub fn translate(
    fragment: &CodeFragment,
    engine_diagnostics: Vec<EngineDiagnostic>,
) -> Vec<Diagnostic> {
    let mut translated = Vec::with_capacity(engine_diagnostics.len());
    for diagnostic in engine_diagnostics {
        let Some(local) = diagnostic.range else {
            debug!(
                ordinal = fragment.ordinal,
                message = %diagnostic.message,
                "dropping engine diagnostic without a position"
            );
            continue;
        };
        let mut mapped = Diagnostic::new(
            mapper::range_to_host(fragment, local),
            diagnostic.severity,
            diagnostic.message,
        );
        if let Some(code) = diagnostic.code {
            mapped = mapped.with_code(code);
        }
        translated.push(mapped);
    }
    translated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::HostRange;
    use crate::types::{DiagnosticCode, DiagnosticSeverity, Position, Range, PROVENANCE};

    fn fragment() -> CodeFragment {
        CodeFragment {
            ordinal: 0,
            source_text: "const x: number = \"y\";\n".to_string(),
            host_range: HostRange {
                start_line: 2,
                end_line: 2,
                start_offset: 19,
                end_offset: 46,
            },
            indent_width: 4,
        }
    }

    #[test]
    fn maps_range_and_stamps_provenance() {
        let engine_diag = EngineDiagnostic::error(
            Range::new(Position::new(0, 18), Position::new(0, 21)),
            "Type 'string' is not assignable to type 'number'.",
        )
        .with_code(2322);

        let out = translate(&fragment(), vec![engine_diag]);
        assert_eq!(out.len(), 1);

        let diag = &out[0];
        assert_eq!(diag.range.start, Position::new(2, 22));
        assert_eq!(diag.range.end, Position::new(2, 25));
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.code, Some(DiagnosticCode::Number(2322)));
        assert_eq!(diag.source, PROVENANCE);
        assert_eq!(
            diag.message,
            "Type 'string' is not assignable to type 'number'."
        );
    }

    #[test]
    fn positionless_diagnostics_are_dropped() {
        let with_position = EngineDiagnostic::error(
            Range::point(Position::new(0, 0)),
            "positioned",
        );
        let without_position = EngineDiagnostic {
            range: None,
            severity: DiagnosticSeverity::Error,
            message: "global project error".to_string(),
            code: None,
        };

        let out = translate(&fragment(), vec![without_position, with_position]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "positioned");
    }

    #[test]
    fn empty_input_translates_to_empty_output() {
        assert!(translate(&fragment(), Vec::new()).is_empty());
    }

    #[test]
    fn severity_and_text_codes_pass_through() {
        let warning = EngineDiagnostic {
            range: Some(Range::point(Position::new(0, 0))),
            severity: DiagnosticSeverity::Warning,
            message: "unused variable".to_string(),
            code: Some(DiagnosticCode::Text("no-unused".to_string())),
        };

        let out = translate(&fragment(), vec![warning]);
        assert_eq!(out[0].severity, DiagnosticSeverity::Warning);
        assert_eq!(out[0].code, Some(DiagnosticCode::Text("no-unused".to_string())));
    }
}
