//! Admin gate for mutating directory routes.

use axum::http::HeaderMap;

use crate::common::ApiError;

/// Header carrying the shared admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Check the shared-secret header against the configured secret.
///
/// Fails closed: a missing or empty `ADMIN_SECRET` rejects every
/// request rather than waving them through.
pub fn require_admin(headers: &HeaderMap, admin_secret: Option<&str>) -> Result<(), ApiError> {
    let expected = admin_secret
        .filter(|s| !s.is_empty())
        .ok_or_else(ApiError::unauthorized)?;

    let presented = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if presented != expected {
        return Err(ApiError::unauthorized());
    }

    Ok(())
}
