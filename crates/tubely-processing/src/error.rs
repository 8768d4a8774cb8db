use std::time::Duration;
use thiserror::Error;

/// Errors raised while running the external media tools.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    #[error("{tool} timed out after {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    #[error("Unexpected probe output: {0}")]
    ProbeOutput(String),

    #[error("No video stream found")]
    NoVideoStream,
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
