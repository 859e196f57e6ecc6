//! tangle Language Server Protocol implementation.
//!
//! This crate binds `tangle-core` to an editor with the tower-lsp
//! framework. Document open/change/close notifications drive the document
//! controller, the built-in TypeScript syntax engine analyzes each detected
//! fragment, and the translated diagnostics are published back to the
//! client in host-document coordinates.
//!
//! ```text
//! editor ──didOpen/didChange/didClose──▶ server.rs
//!                                           │
//!                       tangle-core (detect, store, translate)
//!                                           │
//! editor ◀──publishDiagnostics── convert.rs (core ↔ lsp_types)
//! ```
//!
//! # Usage
//!
//! The LSP server is invoked via the `tangle lsp` subcommand:
//!
//! ```bash
//! tangle lsp
//! ```
//!
//! Or programmatically:
//!
//! ```rust,ignore
//! tangle_lsp::run_server().await;
//! ```

pub mod capabilities;
pub mod convert;
pub mod server;

pub use server::run_server;
