//! Error types for pipeline construction and transport.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors from building stages or moving entries in and out of a
/// pipeline. Applying a built stage to an entry cannot fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Compiling the redaction configuration failed.
    #[error("redact error: {0}")]
    Redact(#[from] lv_redact::RedactError),

    /// I/O error on the underlying reader or writer.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry serialization failed on the way out.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
