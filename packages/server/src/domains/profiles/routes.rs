//! Profile routes: read the profile with activity stats, update
//! preferences.

use axum::extract::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult};
use crate::domains::activity::ActivityEntry;
use crate::kernel::ServerDeps;
use crate::server::middleware::{require_user, AuthUser};

use super::models::Profile;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub total_activities: i64,
}

/// GET /user/profile
pub async fn get_profile(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = require_user(user)?;

    let profile = Profile::find_by_id(user.user_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    let total_activities = ActivityEntry::count_for_user(user.user_id, &deps.db_pool).await?;

    Ok(Json(ProfileResponse {
        profile,
        total_activities,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub preferences: Option<serde_json::Value>,
}

/// PATCH /user/profile
pub async fn update_profile(
    Extension(deps): Extension<ServerDeps>,
    user: Option<Extension<AuthUser>>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Value>> {
    let user = require_user(user)?;

    let preferences = req
        .preferences
        .filter(|p| !p.is_null())
        .ok_or_else(|| ApiError::validation("Missing preferences"))?;

    let profile = Profile::upsert_preferences(user.user_id, &preferences, &deps.db_pool).await?;

    Ok(Json(json!({
        "success": true,
        "preferences": profile.preferences,
    })))
}
