use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// `GET /`: liveness banner listing the available endpoints.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "docchat backend running. Endpoints: /chat-pdf, /send-email"
    }))
}
