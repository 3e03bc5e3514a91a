//! Error types for capture ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a network capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture file could not be read.
    #[error("reading capture {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The capture payload is not a valid HAR document.
    #[error("parsing HAR JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;
