//! API error taxonomy and its HTTP mapping.
//!
//! Handlers return `ApiResult<T>`; every failure funnels through
//! [`ApiError`], which renders a `{ "error": ..., "details"? }` JSON body
//! with the status the failure class calls for. Upstream failures
//! (scrape, model, model-output parsing) are 502s: the request was fine,
//! the collaborator was not.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use enrichment::EnrichmentError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation (400).
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Addressed record does not exist or is not visible (404).
    #[error("{0}")]
    NotFound(String),

    /// Fetching the target page failed (502).
    #[error("failed to fetch the requested URL: {0}")]
    ScrapeFailed(String),

    /// The generative model call itself failed (502).
    #[error("enrichment failed: {0}")]
    EnrichmentFailed(String),

    /// The model answered but produced nothing parseable (502).
    #[error("model output contained no usable JSON{}", details_suffix(.0))]
    NoStructuredData(Option<String>),

    /// Database failure (500).
    #[error("persistence failed: {0}")]
    Persistence(sqlx::Error),

    /// Anything else (500).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn details_suffix(details: &Option<String>) -> String {
    match details {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<EnrichmentError> for ApiError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::ScrapeFailed { url, reason } => {
                Self::ScrapeFailed(format!("{}: {}", url, reason))
            }
            EnrichmentError::EnrichmentFailed(msg) => Self::EnrichmentFailed(msg),
            EnrichmentError::NoStructuredDataFound => Self::NoStructuredData(None),
            EnrichmentError::InvalidJson(e) => Self::NoStructuredData(Some(e.to_string())),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("record not found".to_string()),
            other => Self::Persistence(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::ScrapeFailed(details) => (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch URL".to_string(),
                Some(details),
            ),
            ApiError::EnrichmentFailed(details) => (
                StatusCode::BAD_GATEWAY,
                "AI enrichment failed".to_string(),
                Some(details),
            ),
            ApiError::NoStructuredData(details) => (
                StatusCode::BAD_GATEWAY,
                "Model output contained no usable JSON".to_string(),
                details,
            ),
            ApiError::Persistence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Persistence failed".to_string(),
                Some(e.to_string()),
            ),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(e.to_string()),
            ),
        };

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(%status, error = %error, details = ?details, "request failed")
            }
            StatusCode::BAD_GATEWAY => {
                warn!(%status, error = %error, details = ?details, "upstream failure")
            }
            _ => debug!(%status, error = %error, "request rejected"),
        }

        (status, Json(ErrorBody { error, details })).into_response()
    }
}
