//! Host-document lifecycle: detection passes, virtual document ownership,
//! diagnostic state.

use std::collections::HashMap;

use tracing::debug;

use crate::detect::{detect, Detection};
use crate::engine::{AnalysisRequest, EngineDiagnostic};
use crate::fragment::{virtual_uri, CodeFragment};
use crate::store::FragmentStore;
use crate::translate::translate;
use crate::types::Diagnostic;

/// Per-host state for the latest detection pass.
#[derive(Debug)]
struct DocumentState {
    generation: u64,
    fragments: Vec<CodeFragment>,
    virtual_uris: Vec<String>,
    /// Translated diagnostics, one slot per fragment ordinal.
    diagnostics: Vec<Vec<Diagnostic>>,
}

/// The merged diagnostic set to publish for one host document.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsUpdate {
    pub host_uri: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Coordinates detection passes, virtual document ownership and diagnostic
/// state for every watched host document.
///
/// A document is watched while it has a table entry and closed once the
/// entry is removed; each open or change runs one synchronous detection
/// pass tagged with a fresh generation number. Generations are monotonic
/// over the controller's lifetime, so a response for a closed-and-reopened
/// document can never masquerade as current. The table is owned by the
/// controller instance; there is no process-wide state.
#[derive(Debug, Default)]
pub struct DocumentController {
    store: FragmentStore,
    documents: HashMap<String, DocumentState>,
    next_generation: u64,
}

impl DocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store owning all virtual fragment documents, for engines to read
    /// through.
    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    /// Begin watching `uri` with `text` as its content.
    pub fn open(&mut self, uri: &str, text: &str) -> Vec<AnalysisRequest> {
        self.refresh(uri, text)
    }

    /// Replace the watched content of `uri` wholesale.
    pub fn change(&mut self, uri: &str, text: &str) -> Vec<AnalysisRequest> {
        self.refresh(uri, text)
    }

    /// Run a detection pass: retire the previous pass entirely (virtual
    /// documents and translated diagnostics included), then register the new
    /// fragment set and hand back one generation-tagged request per
    /// fragment.
    fn refresh(&mut self, uri: &str, text: &str) -> Vec<AnalysisRequest> {
        if let Some(old) = self.documents.remove(uri) {
            for stale in &old.virtual_uris {
                self.store.unregister(stale);
            }
        }

        let Detection { fragments, pass } = detect(text);
        debug!(uri, ?pass, fragments = fragments.len(), "detection pass complete");

        let generation = self.next_generation;
        self.next_generation += 1;

        let mut virtual_uris = Vec::with_capacity(fragments.len());
        let mut requests = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            let vuri = virtual_uri(uri, fragment.ordinal);
            self.store
                .register(vuri.clone(), fragment.source_text.clone());
            requests.push(AnalysisRequest {
                host_uri: uri.to_string(),
                virtual_uri: vuri.clone(),
                generation,
                ordinal: fragment.ordinal,
            });
            virtual_uris.push(vuri);
        }

        let diagnostics = vec![Vec::new(); fragments.len()];
        self.documents.insert(
            uri.to_string(),
            DocumentState {
                generation,
                fragments,
                virtual_uris,
                diagnostics,
            },
        );
        requests
    }

    /// Accept an engine response for one fragment.
    ///
    /// Returns the full merged diagnostic set for the host document, or
    /// `None` when the response is stale (closed document or superseded
    /// generation) and was discarded. Accepted diagnostics replace whatever
    /// the fragment had before; they are never appended.
    pub fn accept(
        &mut self,
        request: &AnalysisRequest,
        engine_diagnostics: Vec<EngineDiagnostic>,
    ) -> Option<DiagnosticsUpdate> {
        let Some(state) = self.documents.get_mut(&request.host_uri) else {
            debug!(uri = %request.host_uri, "discarding response for closed document");
            return None;
        };
        if request.generation != state.generation {
            debug!(
                uri = %request.host_uri,
                response = request.generation,
                current = state.generation,
                "discarding stale response"
            );
            return None;
        }
        let Some(fragment) = state.fragments.get(request.ordinal) else {
            debug!(
                uri = %request.host_uri,
                ordinal = request.ordinal,
                "discarding response for unknown fragment"
            );
            return None;
        };

        let translated = translate(fragment, engine_diagnostics);
        state.diagnostics[request.ordinal] = translated;
        Some(DiagnosticsUpdate {
            host_uri: request.host_uri.clone(),
            diagnostics: state.diagnostics.iter().flatten().cloned().collect(),
        })
    }

    /// Stop watching `uri`: destroy its virtual documents, drop its state,
    /// and report an empty diagnostic set for publication.
    pub fn close(&mut self, uri: &str) -> DiagnosticsUpdate {
        if let Some(state) = self.documents.remove(uri) {
            for owned in &state.virtual_uris {
                self.store.unregister(owned);
            }
        }
        DiagnosticsUpdate {
            host_uri: uri.to_string(),
            diagnostics: Vec::new(),
        }
    }

    /// Current merged diagnostics for `uri`, in fragment document order.
    /// Empty for unwatched documents.
    pub fn diagnostics(&self, uri: &str) -> Vec<Diagnostic> {
        self.documents
            .get(uri)
            .map(|state| state.diagnostics.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }
}
