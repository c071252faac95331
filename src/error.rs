use thiserror::Error;

/// Errors surfaced by the betting slip manager and its capabilities
#[derive(Error, Debug)]
pub enum SlipError {
    /// Rejected input: empty slip, non-positive stake, sub-minimum stake,
    /// or a structurally invalid selection
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No authenticated session at submission time
    #[error("Authentication required")]
    AuthRequired,

    /// The bet submission gateway was unavailable, rejected the bet or timed out
    #[error("Bet submission failed: {0}")]
    SubmissionFailed(String),

    /// Persistence adapter read/write errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for slip operations
pub type SlipResult<T> = Result<T, SlipError>;

impl SlipError {
    /// Check if the error is a caller mistake rather than a system fault
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SlipError::InvalidInput(_))
    }

    /// Check if the error requires the caller to sign in first
    pub fn is_auth_required(&self) -> bool {
        matches!(self, SlipError::AuthRequired)
    }

    /// Check if retrying the same call later could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SlipError::SubmissionFailed(_) | SlipError::Storage(_)
        )
    }
}
