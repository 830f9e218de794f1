//! Tool directory routes: public listing plus the admin surface that
//! feeds it (manual create, delete, re-enrichment) and the analysis and
//! curation workflows.

use axum::extract::{Extension, Path, Query};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use url::Url;
use uuid::Uuid;

use enrichment::{
    analyze_tool, curate_new_tools, AnalyzedTool, FieldSource, PlatformLink, PricingTier,
    ToolDraft, DEFAULT_CURATE_COUNT,
};

use crate::common::{require_admin, ApiError, ApiResult};
use crate::kernel::ServerDeps;

use super::models::Tool;

/// Upper bound on one curation pass, keeps a typo from asking for 500 tools
const MAX_CURATE_COUNT: usize = 25;

/// GET /tools
pub async fn list_tools(Extension(deps): Extension<ServerDeps>) -> ApiResult<Json<Vec<Tool>>> {
    let tools = Tool::find_all(&deps.db_pool).await?;
    Ok(Json(tools))
}

#[derive(Debug, Deserialize)]
pub struct CreateToolRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pricing: Option<PricingTier>,
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// POST /tools (admin)
pub async fn create_tool(
    Extension(deps): Extension<ServerDeps>,
    headers: HeaderMap,
    Json(req): Json<CreateToolRequest>,
) -> ApiResult<Json<Value>> {
    require_admin(&headers, deps.admin_secret.as_deref())?;

    if req.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    if req.platforms.is_empty() {
        return Err(ApiError::validation("A platform URL is required"));
    }
    for platform in &req.platforms {
        validate_http_url(&platform.url)?;
    }

    let draft = ToolDraft {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        description: req.description,
        tags: req.tags,
        pricing: req.pricing.unwrap_or(PricingTier::Paid),
        platforms: req.platforms,
        image: req.image,
        featured: req.featured,
    };

    let tool = Tool::upsert_draft(&draft, &deps.db_pool).await?;
    info!(id = %tool.id, name = %tool.name, "tool created");

    Ok(Json(json!({ "success": true, "tool": tool })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteToolQuery {
    pub id: Option<Uuid>,
}

/// DELETE /tools?id= (admin)
///
/// Deleting an id that was never there is still a 200: the caller asked
/// for the record to be gone and it is.
pub async fn delete_tool(
    Extension(deps): Extension<ServerDeps>,
    headers: HeaderMap,
    Query(query): Query<DeleteToolQuery>,
) -> ApiResult<Json<Value>> {
    require_admin(&headers, deps.admin_secret.as_deref())?;

    let id = query.id.ok_or_else(|| ApiError::validation("Missing ID"))?;

    let removed = Tool::delete_by_id(id, &deps.db_pool).await?;
    if removed > 0 {
        info!(%id, "tool deleted");
    }

    Ok(Json(json!({ "success": true, "removed": removed })))
}

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    #[serde(default)]
    pub url: String,
}

/// POST /enrich
///
/// Pure analysis: scrape, classify, generate, merge. Nothing is
/// persisted; the admin reviews the draft and saves it explicitly.
pub async fn enrich_url(
    Extension(deps): Extension<ServerDeps>,
    Json(req): Json<EnrichRequest>,
) -> ApiResult<Json<Value>> {
    if req.url.trim().is_empty() {
        return Err(ApiError::validation("URL is required"));
    }
    validate_http_url(&req.url)?;

    let completer = deps.completer();
    let analyzed = analyze_tool(deps.fetcher.as_ref(), &completer, req.url.trim()).await?;

    Ok(Json(json!({
        "success": true,
        "tool": analyzed.tool,
        "provenance": analyzed.provenance,
        "metadata": analyzed.scraped,
    })))
}

/// POST /tools/{id}/enrich (admin)
///
/// Re-run analysis for a stored tool and merge the result in place. The
/// id and created_at never change.
pub async fn enrich_existing_tool(
    Extension(deps): Extension<ServerDeps>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    require_admin(&headers, deps.admin_secret.as_deref())?;

    let existing = Tool::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Tool not found"))?;

    let url = existing
        .primary_url()
        .ok_or_else(|| ApiError::validation("Tool has no web URL to analyze"))?
        .to_string();

    let completer = deps.completer();
    let analyzed = analyze_tool(deps.fetcher.as_ref(), &completer, &url).await?;

    let merged = merge_into_existing(&existing, &analyzed);
    let tool = Tool::upsert_draft(&merged, &deps.db_pool).await?;
    info!(id = %tool.id, name = %tool.name, "tool re-enriched");

    Ok(Json(json!({ "success": true, "tool": tool })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CurateRequest {
    pub count: Option<usize>,
}

/// POST /curate
///
/// Discover new tools and persist only genuinely new ones. All writes
/// run in one transaction: a failure anywhere persists nothing.
pub async fn curate_tools(
    Extension(deps): Extension<ServerDeps>,
    body: Option<Json<CurateRequest>>,
) -> ApiResult<Json<Value>> {
    let want = body
        .and_then(|Json(req)| req.count)
        .unwrap_or(DEFAULT_CURATE_COUNT)
        .clamp(1, MAX_CURATE_COUNT);

    let existing_names = Tool::existing_names(&deps.db_pool).await?;

    let completer = deps.grounded_completer();
    let accepted = curate_new_tools(&completer, &existing_names, want).await?;

    let mut tx = deps.db_pool.begin().await?;
    let mut tools = Vec::with_capacity(accepted.len());
    for draft in &accepted {
        tools.push(Tool::upsert_draft(draft, &mut *tx).await?);
    }
    tx.commit().await?;

    info!(added = tools.len(), "curation pass persisted");

    Ok(Json(json!({
        "success": true,
        "added": tools.len(),
        "tools": tools,
    })))
}

/// Merge a fresh analysis into a stored tool.
///
/// A field moves only when the analysis actually sourced it: absent and
/// explicitly-empty generative output both preserve the stored value.
/// Platforms stay as stored; the image updates only when the page
/// offered one.
fn merge_into_existing(existing: &Tool, analyzed: &AnalyzedTool) -> ToolDraft {
    let fresh = &analyzed.tool;
    let provenance = &analyzed.provenance;
    let mut draft = existing.to_draft();

    if provenance.name != FieldSource::Default {
        draft.name = fresh.name.clone();
    }
    if provenance.description != FieldSource::Default {
        draft.description = fresh.description.clone();
    }
    if provenance.tags != FieldSource::Default && !fresh.tags.is_empty() {
        draft.tags = fresh.tags.clone();
    }
    if provenance.pricing != FieldSource::Default {
        draft.pricing = fresh.pricing;
    }
    if provenance.featured != FieldSource::Default {
        draft.featured = fresh.featured;
    }
    if let Some(image) = &fresh.image {
        draft.image = Some(image.clone());
    }

    draft
}

fn validate_http_url(raw: &str) -> Result<(), ApiError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| ApiError::validation(format!("Invalid URL: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::validation("URL must be http or https"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use enrichment::{FieldProvenance, ScrapeSummary};
    use sqlx::types::Json as SqlJson;

    fn stored_tool() -> Tool {
        Tool {
            id: Uuid::new_v4(),
            name: "Midjourney".to_string(),
            description: "Image generation".to_string(),
            tags: vec!["Image".to_string()],
            pricing: PricingTier::Paid,
            platforms: SqlJson(vec![PlatformLink::web("https://midjourney.com")]),
            image: Some("https://midjourney.com/og.png".to_string()),
            featured: true,
            created_at: Utc::now(),
        }
    }

    fn analyzed(tool: ToolDraft, provenance: FieldProvenance) -> AnalyzedTool {
        AnalyzedTool {
            tool,
            provenance,
            scraped: ScrapeSummary {
                scraped_title: None,
                scraped_description: None,
                detected_pricing: None,
                favicon: None,
            },
        }
    }

    fn all_default() -> FieldProvenance {
        FieldProvenance {
            name: FieldSource::Default,
            description: FieldSource::Default,
            tags: FieldSource::Default,
            pricing: FieldSource::Default,
            featured: FieldSource::Default,
        }
    }

    #[test]
    fn test_merge_preserves_fields_the_analysis_could_not_source() {
        let existing = stored_tool();
        let fresh = ToolDraft {
            id: Uuid::new_v4(),
            name: "Unknown Tool".to_string(),
            description: String::new(),
            tags: vec![],
            pricing: PricingTier::Paid,
            platforms: vec![PlatformLink::web("https://midjourney.com")],
            image: None,
            featured: false,
        };

        let merged = merge_into_existing(&existing, &analyzed(fresh, all_default()));

        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.name, "Midjourney");
        assert_eq!(merged.description, "Image generation");
        assert_eq!(merged.tags, vec!["Image"]);
        assert!(merged.featured);
        assert_eq!(merged.image.as_deref(), Some("https://midjourney.com/og.png"));
    }

    #[test]
    fn test_merge_takes_sourced_fields_and_keeps_id() {
        let existing = stored_tool();
        let fresh = ToolDraft {
            id: Uuid::new_v4(),
            name: "Midjourney v7".to_string(),
            description: "Latest image model".to_string(),
            tags: vec!["Image".to_string(), "Art".to_string()],
            pricing: PricingTier::Freemium,
            platforms: vec![PlatformLink::web("https://midjourney.com")],
            image: Some("https://midjourney.com/new-og.png".to_string()),
            featured: false,
        };
        let provenance = FieldProvenance {
            name: FieldSource::Generated,
            description: FieldSource::Generated,
            tags: FieldSource::Generated,
            pricing: FieldSource::Heuristic,
            featured: FieldSource::Generated,
        };

        let merged = merge_into_existing(&existing, &analyzed(fresh, provenance));

        assert_eq!(merged.id, existing.id, "id must survive the merge");
        assert_eq!(merged.name, "Midjourney v7");
        assert_eq!(merged.pricing, PricingTier::Freemium);
        assert!(!merged.featured);
        assert_eq!(
            merged.image.as_deref(),
            Some("https://midjourney.com/new-og.png")
        );
        assert_eq!(
            merged.platforms,
            existing.platforms.0,
            "platforms stay as stored"
        );
    }

    #[test]
    fn test_merge_ignores_generated_but_empty_tags() {
        let existing = stored_tool();
        let mut fresh = existing.to_draft();
        fresh.tags = vec![];
        let mut provenance = all_default();
        provenance.tags = FieldSource::Generated;

        let merged = merge_into_existing(&existing, &analyzed(fresh, provenance));
        assert_eq!(merged.tags, vec!["Image"]);
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://flux.dev").is_ok());
        assert!(validate_http_url("http://flux.dev/pricing?x=1").is_ok());
        assert!(validate_http_url("ftp://flux.dev").is_err());
        assert!(validate_http_url("not a url").is_err());
        assert!(validate_http_url("").is_err());
    }
}
