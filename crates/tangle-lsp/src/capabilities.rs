//! LSP capability negotiation.

use tower_lsp::lsp_types::{
    ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions,
};

/// Get the server capabilities to report to the client.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Text document synchronization
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                // We want to know when documents are opened/closed
                open_close: Some(true),
                // Full document sync: every change replaces the text and
                // re-runs detection wholesale
                change: Some(TextDocumentSyncKind::FULL),
                // We don't need save notifications
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_include_document_sync() {
        let caps = server_capabilities();
        assert!(caps.text_document_sync.is_some());
    }

    #[test]
    fn sync_is_full_with_open_close() {
        let caps = server_capabilities();
        let Some(TextDocumentSyncCapability::Options(options)) = caps.text_document_sync else {
            panic!("expected sync options");
        };
        assert_eq!(options.open_close, Some(true));
        assert_eq!(options.change, Some(TextDocumentSyncKind::FULL));
    }
}
