//! The analysis-engine contract.
//!
//! Engines are external subject matter; the core only fixes the seam: a
//! request naming a virtual document, content read through
//! [`ContentProvider`], diagnostics reported back in fragment-local
//! coordinates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::ContentProvider;
use crate::types::{DiagnosticCode, DiagnosticSeverity, Range};

/// One unit of analysis work: a single fragment of a single detection pass.
///
/// The generation number identifies the pass. Responses carrying a stale
/// generation are discarded by the controller, which is what makes late
/// engine replies harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Host document the fragment came from.
    pub host_uri: String,
    /// Virtual document holding the fragment's content.
    pub virtual_uri: String,
    /// Detection pass that produced the fragment.
    pub generation: u64,
    /// Fragment index within the pass.
    pub ordinal: usize,
}

/// A diagnostic as reported by an engine, in fragment-local coordinates.
///
/// `range: None` means the engine could not attach a position; such
/// diagnostics are dropped during translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDiagnostic {
    pub range: Option<Range>,
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<DiagnosticCode>,
}

impl EngineDiagnostic {
    /// An error-severity diagnostic at `range`.
    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self {
            range: Some(range),
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            code: None,
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<DiagnosticCode>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Failure modes of an analysis engine.
///
/// An engine failure never fails the host document; the affected fragment
/// contributes no diagnostics and every other fragment is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine could not load or configure its grammar.
    #[error("engine grammar unavailable: {0}")]
    Grammar(String),
    /// Analysis of one virtual document failed.
    #[error("analysis of {uri} failed: {message}")]
    Analysis { uri: String, message: String },
}

/// A language-analysis engine consuming virtual fragment documents.
pub trait AnalysisEngine {
    /// Analyze the virtual document at `uri`, reading its content through
    /// `provider`, and report diagnostics in fragment-local coordinates.
    fn analyze(
        &mut self,
        uri: &str,
        provider: &dyn ContentProvider,
    ) -> Result<Vec<EngineDiagnostic>, EngineError>;
}
