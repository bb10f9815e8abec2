//! Axum route handlers for the Extraction API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{extract_docx, extract_lines, Extraction};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ExtractTextRequest {
    pub lines: Vec<String>,
}

/// POST /api/v1/extract
///
/// Accepts a .docx upload and returns the extracted record plus warnings.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Extraction>, AppError> {
    let bytes = read_upload(multipart).await?;
    let extraction = extract_upload(bytes, &state).await?;
    Ok(Json(extraction))
}

/// POST /api/v1/extract/text
///
/// Same classifier over lines supplied directly as JSON.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    Json(request): Json<ExtractTextRequest>,
) -> Result<Json<Extraction>, AppError> {
    let extraction = extract_lines(request.lines, state.config.header_match);
    log_extraction(&extraction);
    Ok(Json(extraction))
}

/// Pulls the bytes of the `file` field out of a multipart body.
pub async fn read_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field.bytes().await?;
            if bytes.is_empty() {
                return Err(AppError::Validation("uploaded file is empty".to_string()));
            }
            return Ok(bytes);
        }
    }
    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// Parses the docx off the async executor.
pub async fn extract_upload(bytes: Bytes, state: &AppState) -> Result<Extraction, AppError> {
    let mode = state.config.header_match;
    let extraction = tokio::task::spawn_blocking(move || extract_docx(&bytes, mode))
        .await
        .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in extraction: {e}")))??;
    log_extraction(&extraction);
    Ok(extraction)
}

fn log_extraction(extraction: &Extraction) {
    if !extraction.warnings.is_empty() {
        warn!(
            count = extraction.warnings.len(),
            "lines dropped during extraction"
        );
    }
    info!(
        experience = extraction.record.experience.len(),
        education = extraction.record.education.len(),
        "record extracted"
    );
}
