use specwatch_capture::CaptureError;
use thiserror::Error;

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),
}

pub type ValidatorResult<T> = Result<T, ValidatorError>;
