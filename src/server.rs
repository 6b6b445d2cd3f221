//! HTTP server and routes.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// API routes printed at startup.
pub const API_SUMMARY: &[&str] = &[
    "GET  /api/list",
    "GET  /api/progress?file=...",
    "POST /api/progress",
    "POST /api/upload",
];

/// Create the application router.
///
/// Methods an API path does not handle fall through to the same fallback as
/// unknown paths, so `GET /api/upload` is a static lookup and `POST
/// /api/list` an unknown endpoint.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes();

    Router::new()
        .route("/api/list", get(handlers::list).fallback(handlers::fallback))
        .route(
            "/api/progress",
            get(handlers::get_progress)
                .post(handlers::save_progress)
                .fallback(handlers::fallback),
        )
        .route(
            "/api/upload",
            post(handlers::upload).fallback(handlers::fallback),
        )
        .fallback(handlers::fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
