//! Pure Google Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports text generation, Google Search
//! grounding, and image-input (multimodal) prompts.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Plain text generation
//! let response = client.generate("gemini-2.0-flash", "Say hello").await?;
//!
//! // Search-grounded generation
//! let grounded = client
//!     .generate_with_search("gemini-2.0-flash", "What launched this week?")
//!     .await?;
//!
//! // Image input
//! let description = client
//!     .generate_with_image("gemini-2.5-flash", "Describe this image", "image/png", base64_png)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single generation round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Plain text generation.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<GenerateResponse> {
        self.generate_content(model, GenerateContentRequest::from_prompt(prompt))
            .await
    }

    /// Text generation grounded with Google Search.
    pub async fn generate_with_search(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateResponse> {
        self.generate_content(
            model,
            GenerateContentRequest::from_prompt(prompt).with_search(),
        )
        .await
    }

    /// Text generation over a prompt plus an inline image.
    pub async fn generate_with_image(
        &self,
        model: &str,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<GenerateResponse> {
        self.generate_content(
            model,
            GenerateContentRequest::from_prompt_with_data(prompt, mime_type, base64_data),
        )
        .await
    }

    /// Content generation.
    ///
    /// Sends the request to `models/{model}:generateContent` and returns
    /// the first candidate's concatenated text.
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model = %model, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, model = %model, "Gemini API error");
            return Err(GeminiError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let raw: types::GenerateContentResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let usage = raw.usage_metadata;
        let text = raw
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GeminiError::Parse("No candidates in Gemini response".into()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini content generation"
        );

        Ok(GenerateResponse { text, usage })
    }
}
