//! Axum router configuration with middleware.
//!
//! CORS is fully open (any origin/method/header). This matches the Android
//! emulator development setup and must be tightened before production
//! exposure.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Seed images from phone cameras exceed axum's 2 MB default body limit.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::relay::chat))
        .route("/decorate", post(handlers::relay::decorate))
        .route("/chat/send", post(handlers::chat_log::send_message))
        .route("/chat/history", get(handlers::chat_log::get_history))
        .route(
            "/generate_gemini_image",
            post(handlers::conversation::generate_image),
        )
        .route("/gemini_chat", post(handlers::conversation::gemini_chat))
        .route("/upload_drive", post(handlers::upload::upload_drive))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
