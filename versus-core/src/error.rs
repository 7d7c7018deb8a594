//! Error types for the Versus comparison core.
//!
//! Uses `thiserror` for public API error types. The taxonomy separates
//! purely local validation failures (caught before any network activity)
//! from terminal pipeline failures (timeout, transport, unparseable
//! response) and session-level rejections.

/// Top-level error type for the Versus core library.
#[derive(Debug, thiserror::Error)]
pub enum VersusError {
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Errors from the AI comparison pipeline.
///
/// All variants are terminal for the current run; none are retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AiError {
    #[error("AI request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("AI service request failed: {message}")]
    Network { message: String },

    #[error("AI response contained no parseable payload: {message}")]
    MalformedResponse { message: String },
}

impl AiError {
    /// User-displayable message for this failure.
    ///
    /// Timeout and transport failures suggest retrying; an unparseable
    /// response surfaces as a generic analysis failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AiError::Timeout { .. } => "AI analysis timed out. Please try again.",
            AiError::Network { .. } => "AI service unavailable. Please try again.",
            AiError::MalformedResponse { .. } => {
                "Failed to parse AI analysis. Please try again."
            }
        }
    }
}

/// Local input validation failures. Never reach the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    #[error("missing product URL: {field}")]
    EmptyUrl { field: &'static str },

    #[error("not an absolute http/https URL: {url}")]
    InvalidUrl { url: String },
}

impl ValidationError {
    /// User-displayable message for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl { .. } => "Please enter both product URLs.",
            ValidationError::InvalidUrl { .. } => {
                "Please enter valid URLs (starting with http/https)."
            }
        }
    }
}

/// Errors from the session state machine.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("A comparison is already running")]
    AlreadyRunning,
}

/// A type alias for results using the top-level `VersusError`.
pub type Result<T> = std::result::Result<T, VersusError>;
