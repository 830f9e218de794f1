//! Vault routes: save, list, share, delete, plus the unauthenticated
//! share fetch.

use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::activity::ActivityEntry;
use crate::kernel::ServerDeps;
use crate::server::middleware::{require_user, AuthUser};

use super::models::Generation;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub tool_kind: String,
    #[serde(default)]
    pub input_data: serde_json::Value,
    #[serde(default)]
    pub output_text: String,
}

/// POST /vault/save
pub async fn save_generation(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<SaveRequest>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;

    if req.tool_kind.trim().is_empty() || req.output_text.is_empty() {
        return Err(ApiError::validation("Missing required fields"));
    }

    // Absent or null input payload still satisfies the NOT NULL column
    let input_data = if req.input_data.is_null() {
        json!({})
    } else {
        req.input_data
    };

    let entry = Generation::insert(
        user.user_id,
        req.tool_kind.trim(),
        &input_data,
        &req.output_text,
        &deps.db_pool,
    )
    .await?;

    info!(id = %entry.id, tool_kind = %entry.tool_kind, "generation saved");

    ActivityEntry::log(
        user.user_id,
        "vault_save",
        json!({ "tool_kind": entry.tool_kind }),
        &deps.db_pool,
    )
    .await;

    Ok(Json(json!({ "success": true, "entry": entry })))
}

/// GET /vault/list
pub async fn list_generations(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;

    let generations = Generation::find_by_owner(user.user_id, &deps.db_pool).await?;

    Ok(Json(json!({ "generations": generations })))
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub id: Option<Uuid>,
}

/// POST /vault/share
pub async fn share_generation(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;
    let id = req.id.ok_or_else(|| ApiError::validation("Missing ID"))?;

    let shared = Generation::share(id, user.user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Generation not found"))?;

    info!(id = %shared.id, "generation shared");

    ActivityEntry::log(
        user.user_id,
        "vault_share",
        json!({ "generation_id": shared.id }),
        &deps.db_pool,
    )
    .await;

    Ok(Json(json!({
        "success": true,
        "is_public": true,
        "url": format!("{}/share/{}", deps.app_base_url, shared.id),
    })))
}

/// POST /vault/delete
///
/// Deleting an id you do not own (or that never existed) is still a
/// success: the row is not in your vault afterwards either way.
pub async fn delete_generation(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;
    let id = req.id.ok_or_else(|| ApiError::validation("Missing ID"))?;

    let removed = Generation::delete_by_owner(id, user.user_id, &deps.db_pool).await?;
    debug!(%id, removed, "vault delete");

    Ok(Json(json!({ "success": true })))
}

/// GET /share/{id}
///
/// The only unauthenticated read into the vault. Resolves solely for
/// rows whose owner shared them.
pub async fn shared_generation(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Generation>> {
    let generation = Generation::find_public_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Generation not found"))?;

    Ok(Json(generation))
}
