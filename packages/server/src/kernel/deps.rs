//! Server dependencies for handlers (using traits for testability)
//!
//! This module provides the central dependency container injected into
//! every route handler. External services sit behind trait abstractions
//! to enable testing.

use async_trait::async_trait;
use enrichment::{Completer, EnrichmentError, PageFetcher};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::SessionService;
use crate::kernel::BaseGenerativeAI;

// =============================================================================
// Completer Adapter (implements enrichment::Completer trait)
// =============================================================================

/// Wrapper exposing a `BaseGenerativeAI` to the enrichment pipeline.
///
/// The pipeline only knows "complete a prompt". Whether that completion
/// is search-grounded is decided here, at construction: analysis reads a
/// page it already has, curation has to discover live tools.
pub struct CompleterAdapter {
    ai: Arc<dyn BaseGenerativeAI>,
    grounded: bool,
}

impl CompleterAdapter {
    /// Plain completion
    pub fn new(ai: Arc<dyn BaseGenerativeAI>) -> Self {
        Self {
            ai,
            grounded: false,
        }
    }

    /// Search-grounded completion
    pub fn with_search(ai: Arc<dyn BaseGenerativeAI>) -> Self {
        Self { ai, grounded: true }
    }
}

#[async_trait]
impl Completer for CompleterAdapter {
    async fn complete(&self, prompt: &str) -> enrichment::Result<String> {
        let completion = if self.grounded {
            self.ai.complete_with_search(prompt).await
        } else {
            self.ai.complete(prompt).await
        };

        completion.map_err(|e| EnrichmentError::EnrichmentFailed(e.to_string()))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to route handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Generative model behind everything AI-facing. Handlers pick plain,
    /// search-grounded, or vision completion per call.
    pub ai: Arc<dyn BaseGenerativeAI>,
    /// Page fetcher feeding the enrichment pipeline
    pub fetcher: Arc<dyn PageFetcher>,
    /// Session token verification for user-scoped routes
    pub sessions: Arc<SessionService>,
    /// Shared secret gating admin routes; `None` fails every admin check
    pub admin_secret: Option<String>,
    /// Public origin used to mint share links
    pub app_base_url: String,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        ai: Arc<dyn BaseGenerativeAI>,
        fetcher: Arc<dyn PageFetcher>,
        sessions: Arc<SessionService>,
        admin_secret: Option<String>,
        app_base_url: String,
    ) -> Self {
        Self {
            db_pool,
            ai,
            fetcher,
            sessions,
            admin_secret,
            app_base_url,
        }
    }

    /// Enrichment-pipeline view of the model, plain completion
    pub fn completer(&self) -> CompleterAdapter {
        CompleterAdapter::new(self.ai.clone())
    }

    /// Enrichment-pipeline view of the model, search-grounded
    pub fn grounded_completer(&self) -> CompleterAdapter {
        CompleterAdapter::with_search(self.ai.clone())
    }
}
