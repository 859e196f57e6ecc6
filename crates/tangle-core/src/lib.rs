//! Transport-agnostic embedded-TypeScript analysis for YAML documents.
//!
//! This crate finds TypeScript fragments inside YAML hosts, hands each one
//! to a language-analysis engine as an independent virtual document, and
//! maps the resulting diagnostics back onto host coordinates. It has no
//! protocol dependencies: `tangle-lsp` binds it to an editor and the
//! `tangle` CLI drives it one-shot.
//!
//! # Architecture
//!
//! ```text
//! host text ──▶ detect ──▶ fragments ──▶ FragmentStore ──▶ engine
//!                                                            │
//! host diagnostics ◀── DocumentController ◀── translate ◀────┘
//! ```
//!
//! Data flows one direction per pass. The [`DocumentController`] owns the
//! whole cycle: every open or change runs a fresh detection pass, the
//! engine answers per fragment, and stale answers are discarded by
//! generation number.
//!
//! # Usage
//!
//! ```rust
//! use tangle_core::DocumentController;
//!
//! let mut controller = DocumentController::new();
//! let requests = controller.open(
//!     "file:///work/app.yaml",
//!     "handler:\n  code: |\n    const x: number = \"y\";\n",
//! );
//! assert_eq!(requests.len(), 1);
//!
//! // Run each request through an engine, then feed the answers back:
//! let update = controller.accept(&requests[0], Vec::new()).unwrap();
//! assert!(update.diagnostics.is_empty());
//! ```

pub mod controller;
pub mod dedent;
pub mod detect;
pub mod engine;
pub mod fragment;
pub mod heuristic;
pub mod mapper;
pub mod store;
pub mod translate;
pub mod types;

// Re-export main types and functions for convenience
pub use controller::{DiagnosticsUpdate, DocumentController};
pub use detect::{detect, Detection, DetectionPass};
pub use engine::{AnalysisEngine, AnalysisRequest, EngineDiagnostic, EngineError};
pub use fragment::{CodeFragment, HostRange, VIRTUAL_SCHEME};
pub use store::{ContentProvider, FragmentStore, StoreChange};
pub use translate::translate;
pub use types::{
    Diagnostic, DiagnosticCode, DiagnosticSeverity, Position, Range, PROVENANCE,
};
