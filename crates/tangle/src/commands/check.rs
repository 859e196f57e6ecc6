//! Check command implementation.
//!
//! Runs one detection, analysis and translation cycle per input file and
//! prints the diagnostics that fall out, grep-style or as JSON.

use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use tangle_core::{AnalysisEngine, Diagnostic, DiagnosticSeverity, DocumentController};
use tangle_engine_ts::TsSyntaxEngine;

/// Diagnostics for one checked file.
#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

/// Execute the check command.
///
/// Exits with a non-zero status when any error-severity diagnostic was
/// produced, so the command can gate a CI pipeline.
pub fn execute(files: &[String], json: bool) -> Result<()> {
    let mut engine =
        TsSyntaxEngine::new().context("failed to load the TypeScript grammar")?;
    let mut controller = DocumentController::new();

    let mut reports = Vec::with_capacity(files.len());
    let mut error_count = 0usize;

    for file in files {
        let text = fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;

        let requests = controller.open(file, &text);
        for request in &requests {
            let reported = match engine.analyze(&request.virtual_uri, controller.store()) {
                Ok(reported) => reported,
                Err(err) => {
                    warn!(
                        uri = %request.virtual_uri,
                        error = %err,
                        "engine failed, fragment contributes no diagnostics"
                    );
                    Vec::new()
                }
            };
            controller.accept(request, reported);
        }

        let diagnostics = controller.diagnostics(file);
        controller.close(file);

        error_count += diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count();

        if json {
            reports.push(FileReport {
                file: file.clone(),
                diagnostics,
            });
        } else {
            for diagnostic in &diagnostics {
                println!("{}", render(file, diagnostic));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if error_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// One line per diagnostic, 1-based line and column.
fn render(file: &str, diagnostic: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: {}: {}",
        file,
        diagnostic.range.start.line + 1,
        diagnostic.range.start.character + 1,
        diagnostic.severity,
        diagnostic.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_core::{Position, Range};

    #[test]
    fn render_is_one_based() {
        let diagnostic = Diagnostic::new(
            Range::new(Position::new(2, 4), Position::new(2, 10)),
            DiagnosticSeverity::Error,
            "Unexpected token ';'",
        );
        assert_eq!(
            render("deploy.yaml", &diagnostic),
            "deploy.yaml:3:5: error: Unexpected token ';'"
        );
    }

    #[test]
    fn render_includes_severity_name() {
        let diagnostic = Diagnostic::new(
            Range::new(Position::new(0, 0), Position::new(0, 1)),
            DiagnosticSeverity::Warning,
            "unused variable",
        );
        assert!(render("a.yaml", &diagnostic).contains(": warning: "));
    }
}
