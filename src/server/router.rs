use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, email, health};
use crate::state::AppState;

// Multipart bodies are bounded so uploads cannot exhaust memory; generous
// enough for a handful of document PDFs.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Creates the application router with all routes and middleware.
///
/// CORS is fully permissive, matching the frontend's cross-origin access;
/// there is no authentication layer.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root))
        .route("/chat-pdf/", post(chat::chat_pdf))
        .route("/send-email/", post(email::send_email))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
