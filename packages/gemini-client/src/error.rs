//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, blocked prompt)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, empty candidate list)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Whether a retry against a different model version could succeed.
    ///
    /// Config errors are permanent; everything else may be transient or
    /// model-specific (e.g. a preview model rejecting an image payload).
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GeminiError::Config(_))
    }
}
