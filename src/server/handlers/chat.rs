use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tempfile::TempDir;

use crate::core::errors::ApiError;
use crate::pdf;
use crate::rag::{self, ChunkerConfig, RetrievalConfig};
use crate::state::AppState;

/// Uploaded files staged on disk for one request. Dropping the guard
/// removes the directory, success or failure.
struct StagedUpload {
    _dir: TempDir,
    files: Vec<PathBuf>,
    question: String,
}

/// `POST /chat-pdf/`: answers a question from the uploaded PDFs.
///
/// The whole pipeline runs once per request; any stage failure collapses
/// into a 500 with a flattened detail message.
pub async fn chat_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = stage_upload(multipart).await?;
    tracing::info!(files = upload.files.len(), "processing chat-pdf request");

    let text = pdf::extract_text(&upload.files)?;
    let answer = rag::answer_question(
        state.embedder.as_ref(),
        state.generator.as_ref(),
        &text,
        &upload.question,
        &ChunkerConfig::default(),
        &RetrievalConfig::default(),
    )
    .await?;

    Ok(Json(json!({
        "question": upload.question,
        "answer": answer,
    })))
}

/// Writes every `files` part into a fresh temp directory and captures the
/// `question` field. Unknown parts are ignored.
async fn stage_upload(mut multipart: Multipart) -> Result<StagedUpload, ApiError> {
    let dir = TempDir::new().map_err(ApiError::internal)?;
    let mut files = Vec::new();
    let mut question: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        match field.name() {
            Some("files") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "upload.pdf".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?;

                // Index prefix keeps same-named uploads from clobbering
                // each other.
                let staged_name = format!("{}-{}", files.len(), sanitize_filename(&filename));
                let path = dir.path().join(staged_name);
                tokio::fs::write(&path, &bytes)
                    .await
                    .map_err(ApiError::internal)?;
                files.push(path);
            }
            Some("question") => {
                question = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| ApiError::BadRequest(err.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let question = question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing form field: question".to_string()))?;

    Ok(StagedUpload {
        _dir: dir,
        files,
        question,
    })
}

/// Client filenames become a bare base name; traversal attempts fall back
/// to a fixed name.
fn sanitize_filename(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|base| !base.contains("..") && !base.contains('\\'))
        .unwrap_or("upload.pdf")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_accepts_a_normal_filename() {
        assert_eq!(sanitize_filename("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename("report-2026.pdf"), "report-2026.pdf");
    }

    #[test]
    fn sanitize_strips_directory_prefixes() {
        assert_eq!(sanitize_filename("subdir/resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
    }

    #[test]
    fn sanitize_rejects_traversal_attempts() {
        assert_eq!(sanitize_filename("../secret.pdf"), "upload.pdf");
        assert_eq!(sanitize_filename("..\\secret.pdf"), "upload.pdf");
    }
}
