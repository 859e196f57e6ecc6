//! Error types for YAML parsing.

use thiserror::Error;

/// Result type alias for tangle-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during YAML parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner. The message includes
    /// the scanner's own line/column description.
    #[error("YAML parse error: {0}")]
    Parse(String),

    /// The input contained no YAML document at all.
    #[error("no YAML document found")]
    EmptyDocument,
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Parse(err.to_string())
    }
}
