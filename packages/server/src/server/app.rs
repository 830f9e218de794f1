//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::common::ADMIN_SECRET_HEADER;
use crate::domains::activity::routes::{clear_history, list_history, log_activity};
use crate::domains::profiles::routes::{get_profile, update_profile};
use crate::domains::studio::routes::{architect_prompt, deconstruct_image, runway_feed};
use crate::domains::tools::routes::{
    create_tool, curate_tools, delete_tool, enrich_existing_tool, enrich_url, list_tools,
};
use crate::domains::vault::routes::{
    delete_generation, list_generations, save_generation, share_generation, shared_generation,
};
use crate::kernel::ServerDeps;
use crate::server::middleware::session_auth_middleware;
use crate::server::routes::health_handler;

/// Build the Axum application router
///
/// Route handlers receive [`ServerDeps`] through an Extension layer, and
/// the session middleware attaches an `AuthUser` extension when a request
/// carries a valid token. Generative endpoints sit behind a rate limiter;
/// catalog reads and user-scoped CRUD do not.
pub fn build_app(deps: ServerDeps) -> Router {
    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PATCH])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(ADMIN_SECRET_HEADER),
        ]);

    // Clone session service for middleware closure
    let sessions_for_middleware = deps.sessions.clone();

    // Rate limiting configuration
    // Generative endpoints: 10/sec per IP with burst of 20
    // Every request on these routes costs a model call, so they get the
    // tightest protection against abuse and resource exhaustion
    let rate_limit_config = std::sync::Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10) // Base rate: 10 requests per second
            .burst_size(20) // Allow bursts up to 20
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Generative endpoints (rate limited)
    let generative = Router::new()
        .route("/enrich", post(enrich_url))
        .route("/curate", post(curate_tools))
        .route("/architect", post(architect_prompt))
        .route("/deconstruct", post(deconstruct_image))
        .route("/runway", get(runway_feed))
        .layer(rate_limit_layer);

    Router::new()
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Tool directory
        .route(
            "/tools",
            get(list_tools).post(create_tool).delete(delete_tool),
        )
        .route("/tools/:id/enrich", post(enrich_existing_tool))
        // Vault (saved generations)
        .route("/vault/save", post(save_generation))
        .route("/vault/list", get(list_generations))
        .route("/vault/share", post(share_generation))
        .route("/vault/delete", post(delete_generation))
        .route("/share/:id", get(shared_generation))
        // User history and profile
        .route(
            "/user/history",
            get(list_history).post(log_activity).delete(clear_history),
        )
        .route("/user/profile", get(get_profile).patch(update_profile))
        .merge(generative)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            session_auth_middleware(sessions_for_middleware.clone(), req, next)
        })) // Session authentication
        .layer(Extension(deps)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
