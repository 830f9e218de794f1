//! Studio routes: the end-user generation features.
//!
//! These flows degrade rather than explode: the runway feed in
//! particular always answers 200, swapping in canned drops when the
//! live feed cannot be built.

use axum::extract::Extension;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::common::{ApiError, ApiResult};
use crate::kernel::ServerDeps;

use super::prompts::{format_architect_prompt, DECONSTRUCT_PROMPT, RUNWAY_PROMPT};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArchitectRequest {
    pub subject: String,
    pub vibe: String,
    pub medium: String,
    pub lighting: String,
    pub ratio: String,
}

/// POST /architect
pub async fn architect_prompt(
    Extension(deps): Extension<ServerDeps>,
    Json(req): Json<ArchitectRequest>,
) -> ApiResult<Json<Value>> {
    if req.subject.trim().is_empty() {
        return Err(ApiError::validation("Subject is required"));
    }

    let prompt = format_architect_prompt(
        &req.subject,
        &req.vibe,
        &req.medium,
        &req.lighting,
        &req.ratio,
    );

    let text = deps
        .ai
        .complete(&prompt)
        .await
        .map_err(|e| ApiError::EnrichmentFailed(e.to_string()))?;

    Ok(Json(json!({ "prompt": text })))
}

#[derive(Debug, Deserialize)]
pub struct DeconstructRequest {
    #[serde(default)]
    pub image: String,
}

/// POST /deconstruct
///
/// Accepts the image as a data URL (or bare base64) and returns the
/// reverse-engineered prompt.
pub async fn deconstruct_image(
    Extension(deps): Extension<ServerDeps>,
    Json(req): Json<DeconstructRequest>,
) -> ApiResult<Json<Value>> {
    if req.image.is_empty() {
        return Err(ApiError::validation("No image provided"));
    }

    let (mime_type, payload) = parse_data_url(&req.image);
    STANDARD
        .decode(payload)
        .map_err(|_| ApiError::validation("Image payload is not valid base64"))?;

    debug!(mime = %mime_type, payload_chars = payload.len(), "deconstructing image");

    let text = deps
        .ai
        .describe_image(DECONSTRUCT_PROMPT, &mime_type, payload)
        .await
        .map_err(|e| ApiError::EnrichmentFailed(e.to_string()))?;

    Ok(Json(json!({ "prompt": text })))
}

/// One entry in the trending-hardware feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayConcept {
    pub name: String,
    pub description: String,
    pub id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// GET /runway
///
/// The one sanctioned degradation: any failure (model, network, parse)
/// serves the canned drop list with a 200, flagged so clients can tell.
pub async fn runway_feed(Extension(deps): Extension<ServerDeps>) -> Json<Value> {
    match fetch_trending(&deps).await {
        Ok(concepts) => Json(json!({ "concepts": concepts, "fallback": false })),
        Err(e) => {
            warn!(error = %e, "runway feed failed, serving canned drops");
            Json(json!({ "concepts": fallback_concepts(), "fallback": true }))
        }
    }
}

async fn fetch_trending(deps: &ServerDeps) -> anyhow::Result<Vec<RunwayConcept>> {
    let text = deps.ai.complete_with_search(RUNWAY_PROMPT).await?;
    let concepts: Vec<RunwayConcept> = enrichment::extract_array(&text)?;
    Ok(concepts)
}

/// The drops shown when the live feed cannot be built.
fn fallback_concepts() -> Vec<RunwayConcept> {
    vec![
        RunwayConcept {
            name: "APPLE VISION PRO".to_string(),
            description: "Spatial computing enters the mainstream.".to_string(),
            id: "DROP_001".to_string(),
            tags: vec!["Spatial".to_string(), "VR".to_string()],
        },
        RunwayConcept {
            name: "RABBIT R1".to_string(),
            description: "The pocket companion that skips the app store.".to_string(),
            id: "DROP_002".to_string(),
            tags: vec!["AI".to_string(), "Assistant".to_string()],
        },
        RunwayConcept {
            name: "RAY-BAN META".to_string(),
            description: "Multimodal intelligence in a classic frame.".to_string(),
            id: "DROP_003".to_string(),
            tags: vec!["Wearable".to_string(), "Audio".to_string()],
        },
    ]
}

/// Split a data URL into (mime type, base64 payload).
///
/// Bare base64 without a `data:` header is accepted and treated as jpeg,
/// which is what uploads default to anyway.
fn parse_data_url(image: &str) -> (String, &str) {
    match image.split_once(',') {
        Some((header, payload)) => {
            let mime = header
                .strip_prefix("data:")
                .and_then(|h| h.strip_suffix(";base64"))
                .filter(|m| !m.is_empty())
                .unwrap_or("image/jpeg");
            (mime.to_string(), payload)
        }
        None => ("image/jpeg".to_string(), image),
    }
}
