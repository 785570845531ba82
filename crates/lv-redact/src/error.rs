//! Error types for the redaction engine.
//!
//! Everything here surfaces at configuration time, while rule sets are
//! being compiled or loaded. Applying compiled rules to entries cannot
//! fail: redaction sits in the logging path itself and must never be able
//! to crash the producer.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactError>;

/// Errors that can occur while compiling or loading redaction rules.
#[derive(Error, Debug)]
pub enum RedactError {
    /// A path expression was empty. Every non-empty expression parses;
    /// degenerate inputs fall back to a whole-string key lookup.
    #[error("invalid path: expression is empty")]
    EmptyPath,

    /// I/O error while reading a filter configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a filter configuration file.
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}
