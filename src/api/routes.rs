//! API Routes
//!
//! Configures the Axum router with all inspection endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, entry_handler, health_handler, max_cache_handler, navigate_handler,
    policy_handler, remove_handler, scroll_handler, stats_handler, viewport_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Cache keys are usually paths, so `:key` segments arrive percent-encoded
/// (`/entries/%2Forders`).
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/navigate", post(navigate_handler))
        .route("/entries", delete(clear_handler))
        .route("/entries/:key", get(entry_handler).delete(remove_handler))
        .route("/max-cache", put(max_cache_handler))
        .route("/policy", put(policy_handler))
        .route("/viewport", get(viewport_handler).put(scroll_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
