//! Gemini adapter implementing [`BaseGenerativeAI`].
//!
//! Model selection mirrors the product surface: fast experimental flash
//! for throwaway text generation, 2.5 flash for search grounding and
//! vision, with a single retry on the stable 2.0 flash when the vision
//! call fails. Retry policy lives here, not in the client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::GeminiClient;
use tracing::{debug, warn};

use super::traits::BaseGenerativeAI;

/// Primary model: search grounding and vision.
pub const GEMINI_FLASH: &str = "gemini-2.5-flash";

/// Stable fallback for vision when the primary errors.
pub const GEMINI_FLASH_STABLE: &str = "gemini-2.0-flash";

/// Experimental flash used for plain text generation.
pub const GEMINI_FLASH_EXP: &str = "gemini-2.0-flash-exp";

/// Gemini-backed implementation of [`BaseGenerativeAI`].
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
}

impl GeminiAI {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key),
        }
    }

    /// Create from `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client = GeminiClient::from_env().context("Failed to create Gemini client")?;
        Ok(Self { client })
    }

    /// Wrap an existing client (tests point it at a local server).
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseGenerativeAI for GeminiAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .generate(GEMINI_FLASH_EXP, prompt)
            .await
            .context("Gemini completion failed")?;
        Ok(response.text)
    }

    async fn complete_with_search(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .generate_with_search(GEMINI_FLASH, prompt)
            .await
            .context("Gemini search-grounded completion failed")?;
        Ok(response.text)
    }

    async fn describe_image(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String> {
        // Attempt 1: primary vision model
        match self
            .client
            .generate_with_image(GEMINI_FLASH, prompt, mime_type, base64_data)
            .await
        {
            Ok(response) => Ok(response.text),
            Err(err) if err.is_retryable() => {
                warn!(error = %err, model = GEMINI_FLASH, "vision call failed, retrying on stable model");

                // Attempt 2: stable fallback. Any further failure propagates.
                let response = self
                    .client
                    .generate_with_image(GEMINI_FLASH_STABLE, prompt, mime_type, base64_data)
                    .await
                    .context("Gemini vision fallback failed")?;

                debug!(model = GEMINI_FLASH_STABLE, "vision fallback succeeded");
                Ok(response.text)
            }
            Err(err) => Err(err).context("Gemini vision call failed"),
        }
    }
}
