//! Activity history routes. Clients post their own telemetry here; the
//! server also writes vault events directly.

use axum::extract::{Extension, Query};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::common::{ApiError, ApiResult};
use crate::kernel::ServerDeps;
use crate::server::middleware::{require_user, AuthUser};

use super::models::{ActivityEntry, VALID_ACTIVITY_TYPES};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /user/history
pub async fn list_history(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    let kind = query.kind.as_deref().filter(|k| !k.is_empty());

    let (activities, total) =
        ActivityEntry::find_page(user.user_id, kind, limit, offset, &deps.db_pool).await?;

    Ok(Json(json!({
        "activities": activities,
        "total": total,
        "hasMore": total > offset + limit,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    #[serde(default)]
    pub activity_type: String,
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    json!({})
}

/// POST /user/history
///
/// Returns the inserted row bare, no envelope.
pub async fn log_activity(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<LogActivityRequest>,
) -> ApiResult<Json<ActivityEntry>> {
    let user = require_user(user)?;

    if !VALID_ACTIVITY_TYPES.contains(&req.activity_type.as_str()) {
        return Err(ApiError::validation("Invalid activity type"));
    }

    let metadata = if req.metadata.is_null() {
        empty_metadata()
    } else {
        req.metadata
    };

    let entry =
        ActivityEntry::insert(user.user_id, &req.activity_type, &metadata, &deps.db_pool).await?;

    Ok(Json(entry))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClearHistoryQuery {
    pub before: Option<DateTime<Utc>>,
}

/// DELETE /user/history
pub async fn clear_history(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Query(query): Query<ClearHistoryQuery>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;

    let removed = ActivityEntry::delete_for_user(user.user_id, query.before, &deps.db_pool).await?;
    debug!(user_id = %user.user_id, removed, before = ?query.before, "history cleared");

    Ok(Json(json!({ "success": true })))
}
