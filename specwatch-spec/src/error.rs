//! Error types for spec loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a spec load.
///
/// Inconsistencies inside documents (bad rows, dangling enum references,
/// invalid patterns) are not errors; they surface at validation time.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A spec document or directory could not be read.
    #[error("reading spec {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
