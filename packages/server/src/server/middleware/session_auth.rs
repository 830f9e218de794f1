use crate::common::ApiError;
use crate::domains::auth::SessionService;
use axum::{extract::Extension, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Authenticated user information from a verified session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Session authentication middleware
///
/// Extracts the session token from the Authorization header, verifies it,
/// and adds AuthUser to request extensions. If no token or invalid token,
/// the request continues without AuthUser (anonymous access). Routes that
/// need a user reject anonymous requests themselves via [`require_user`].
pub async fn session_auth_middleware(
    sessions: Arc<SessionService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &sessions);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {}", user.user_id);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid session token");
    }

    next.run(request).await
}

/// Require an authenticated user, rejecting anonymous requests with 401
///
/// Handlers take `Option<Extension<AuthUser>>` so anonymous requests reach
/// them instead of failing extraction with an opaque 500.
pub fn require_user(user: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    user.map(|Extension(user)| user)
        .ok_or_else(ApiError::unauthorized)
}

/// Extract and verify the session token from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    sessions: &SessionService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = sessions.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: claims.user_id,
    })
}
