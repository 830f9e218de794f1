//! Core trait abstractions.
//!
//! The pipeline depends on two seams: something that turns a URL into
//! page metadata, and something that completes a text prompt. Server
//! code provides the real implementations; [`crate::testing`] provides
//! scripted mocks.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::PageMetadata;

/// Opaque prompt-completion collaborator.
///
/// Implementations wrap a specific generative provider and are expected
/// to enforce their own bounded timeout. Failures map to
/// [`crate::EnrichmentError::EnrichmentFailed`].
#[async_trait]
pub trait Completer: Send + Sync {
    /// Complete a prompt, returning the raw model text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Opaque URL-to-metadata collaborator.
///
/// Implementations fetch and parse the target page. Failures map to
/// [`crate::EnrichmentError::ScrapeFailed`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page and extract its metadata.
    async fn fetch(&self, url: &str) -> Result<PageMetadata>;
}
