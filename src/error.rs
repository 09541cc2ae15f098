use thiserror::Error;

/// Why a structured classifier response could not be used. Interpreters
/// treat every variant as "no action detected".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("text generation service unavailable")]
    ServiceUnavailable,
    #[error("malformed classifier response: {0}")]
    Malformed(String),
}

/// Capture-layer faults reported by the speech collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionError {
    /// Raised when capture is stopped on purpose. Not a failure.
    #[error("recognition aborted")]
    Aborted,
    #[error("recognition failed: {0}")]
    Failed(String),
}

impl RecognitionError {
    /// Maps a capture reason code onto the taxonomy.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "aborted" => RecognitionError::Aborted,
            other => RecognitionError::Failed(other.to_string()),
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, RecognitionError::Aborted)
    }
}
