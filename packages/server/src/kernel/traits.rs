// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (enrichment, curation, prompt building) lives in domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseGenerativeAI)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Generative AI Trait (Infrastructure - text/vision completion)
// =============================================================================

#[async_trait]
pub trait BaseGenerativeAI: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Complete a prompt with web-search grounding enabled
    ///
    /// Used where the prompt asks about current events (trending tools,
    /// product drops). Falls back to plain completion for providers
    /// without a search tool.
    async fn complete_with_search(&self, prompt: &str) -> Result<String> {
        self.complete(prompt).await
    }

    /// Describe an inline image (base64 payload) guided by a prompt
    async fn describe_image(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String>;
}
