//! Command implementations for the tangle CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! workspace crates for the actual implementation.

pub mod check;
pub mod lsp;
