//! Typed errors for the enrichment library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during enrichment operations.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Fetching the target URL failed (network or non-2xx response)
    #[error("scrape failed for {url}: {reason}")]
    ScrapeFailed { url: String, reason: String },

    /// Generative completion failed (provider error, timeout, empty reply)
    #[error("enrichment failed: {0}")]
    EnrichmentFailed(String),

    /// No balanced bracket span found in the model output
    #[error("no structured data found in model output")]
    NoStructuredDataFound,

    /// A balanced span was found but did not parse as JSON.
    ///
    /// Distinct from [`EnrichmentError::NoStructuredDataFound`] so callers
    /// can log the raw span for diagnosis.
    #[error("invalid JSON in model output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl EnrichmentError {
    /// Shorthand for a scrape failure.
    pub fn scrape(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ScrapeFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the model output itself was unusable (as opposed to an
    /// upstream transport failure).
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            EnrichmentError::NoStructuredDataFound | EnrichmentError::InvalidJson(_)
        )
    }
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
