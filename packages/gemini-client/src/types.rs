//! Gemini API request and response types.
//!
//! Request fields serialize to the names the REST API documents
//! (snake_case for parts, camelCase for `generationConfig`); responses
//! always arrive camelCase.

use serde::{Deserialize, Serialize};

// =============================================================================
// Generate Content
// =============================================================================

/// Content generation request.
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerateContentRequest {
    /// Conversation turns (a single user turn for one-shot prompts)
    pub contents: Vec<Content>,

    /// Tool declarations (e.g. Google Search grounding)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,

    /// Sampling parameters
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn text request.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            ..Default::default()
        }
    }

    /// Single-turn request with a text part and an inline binary part.
    pub fn from_prompt_with_data(
        prompt: impl Into<String>,
        mime_type: impl Into<String>,
        base64_data: impl Into<String>,
    ) -> Self {
        Self {
            contents: vec![Content::user(vec![
                Part::text(prompt),
                Part::inline_data(mime_type, base64_data),
            ])],
            ..Default::default()
        }
    }

    /// Enable Google Search grounding.
    pub fn with_search(mut self) -> Self {
        self.tools = Some(vec![Tool::google_search()]);
        self
    }

    /// Set generation config.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// "user" or "model"
    pub role: String,

    /// Turn parts (text and/or inline data)
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }
}

/// A single content part.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline binary part (base64-encoded).
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Binary payload for multimodal parts.
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,

    /// Base64-encoded bytes
    pub data: String,
}

/// Tool declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<serde_json::Value>,
}

impl Tool {
    /// Google Search grounding tool.
    pub fn google_search() -> Self {
        Self {
            google_search: Some(serde_json::json!({})),
        }
    }
}

/// Sampling parameters.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Content generation response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Concatenated text of the first candidate
    pub text: String,

    /// Token usage, when reported
    pub usage: Option<UsageMetadata>,
}

/// Raw response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponseRaw {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    #[allow(dead_code)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    pub text: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}
