use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Error surfaced at the HTTP boundary.
///
/// Every failure inside the chat pipeline or the mail path collapses into
/// `Internal`; the response body carries a single flattened `detail` string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "detail": message }));
        (status, body).into_response()
    }
}

/// Failure taxonomy of the extract → chunk → index → retrieve → generate
/// pipeline. No stage retries; the first failure aborts the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read PDF: {0}")]
    Extraction(String),
    #[error("no text could be extracted from the PDFs")]
    EmptyContent,
    #[error("error building similarity index: {0}")]
    IndexBuild(String),
    #[error("no indexed documents to search")]
    NoResults,
    #[error("error generating answer: {0}")]
    Generation(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
