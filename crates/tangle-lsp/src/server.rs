//! LSP server implementation using tower-lsp.

use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::warn;

use tangle_core::{AnalysisEngine, AnalysisRequest, DocumentController};
use tangle_engine_ts::TsSyntaxEngine;

use crate::capabilities::server_capabilities;
use crate::convert;

/// Controller and engine, serialized on one lock.
///
/// The fragment store is single-writer and the engine takes `&mut self`;
/// one mutex around both gives exactly the serialization the core assumes.
struct AnalysisState {
    controller: DocumentController,
    engine: Option<Box<dyn AnalysisEngine + Send>>,
}

/// The tangle language server.
pub struct TangleLanguageServer {
    /// The LSP client for sending notifications.
    client: Client,
    /// Document controller plus analysis engine.
    analysis: Mutex<AnalysisState>,
}

impl TangleLanguageServer {
    /// Create a new server instance backed by the built-in syntax engine.
    ///
    /// When the engine cannot load its grammar the server still runs and
    /// every fragment contributes zero diagnostics; nothing about a broken
    /// engine is fatal to the editor session.
    pub fn new(client: Client) -> Self {
        let engine: Option<Box<dyn AnalysisEngine + Send>> = match TsSyntaxEngine::new() {
            Ok(engine) => Some(Box::new(engine)),
            Err(err) => {
                warn!(error = %err, "analysis engine unavailable, diagnostics disabled");
                None
            }
        };
        Self {
            client,
            analysis: Mutex::new(AnalysisState {
                controller: DocumentController::new(),
                engine,
            }),
        }
    }

    /// Publish the given core diagnostics for a document.
    async fn publish(&self, uri: Url, diagnostics: Vec<tangle_core::Diagnostic>) {
        let lsp_diagnostics: Vec<Diagnostic> =
            diagnostics.iter().map(convert::diagnostic_to_lsp).collect();
        self.client
            .publish_diagnostics(uri, lsp_diagnostics, None)
            .await;
    }
}

/// Run the engine over each analysis request and feed the answers back.
///
/// Engine failures are absorbed per fragment: the failing fragment
/// contributes zero diagnostics and the remaining fragments proceed.
fn analyze_requests(state: &mut AnalysisState, requests: &[AnalysisRequest]) {
    for request in requests {
        let reported = match state.engine.as_mut() {
            Some(engine) => {
                match engine.analyze(&request.virtual_uri, state.controller.store()) {
                    Ok(reported) => reported,
                    Err(err) => {
                        warn!(
                            uri = %request.virtual_uri,
                            error = %err,
                            "engine failed, fragment contributes no diagnostics"
                        );
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };
        state.controller.accept(request, reported);
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TangleLanguageServer {
    async fn initialize(&self, _params: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "tangle-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "tangle LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;

        let diagnostics = {
            let mut analysis = self.analysis.lock().await;
            let state = &mut *analysis;
            let requests = state.controller.open(uri.as_str(), &text);
            analyze_requests(state, &requests);
            state.controller.diagnostics(uri.as_str())
        };

        // Always publish, even when empty: an opened document with no
        // fragments must not keep squiggles from an earlier session.
        self.publish(uri, diagnostics).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // We're using full document sync, so take the last change
        if let Some(change) = params.content_changes.into_iter().last() {
            let diagnostics = {
                let mut analysis = self.analysis.lock().await;
                let state = &mut *analysis;
                let requests = state.controller.change(uri.as_str(), &change.text);
                analyze_requests(state, &requests);
                state.controller.diagnostics(uri.as_str())
            };

            self.publish(uri, diagnostics).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        {
            let mut analysis = self.analysis.lock().await;
            analysis.controller.close(uri.as_str());
        }

        // Clear diagnostics for closed document
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

/// Run the LSP server over stdio.
pub async fn run_server() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(TangleLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
