//! HTTP API route definitions.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    health, info, method_not_allowed, metrics_text, process, AppState, PROCESS_PATH,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/", get(info))
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Processing endpoint; any other method gets the legacy 405 body
        .route(PROCESS_PATH, post(process).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
