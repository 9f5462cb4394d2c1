use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::mail::EmailMessage;
use crate::state::AppState;

/// `POST /send-email/`: delivers one plain-text message through the
/// configured relay. Delivery failures surface as a 500 with the transport
/// error flattened into the detail message.
pub async fn send_email(
    State(state): State<Arc<AppState>>,
    Json(message): Json<EmailMessage>,
) -> Result<impl IntoResponse, ApiError> {
    state.mailer.send(&message).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Email sent successfully to {}", message.recipient),
    })))
}
