//! Axum route handlers for the Render API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::handlers::{extract_upload, read_upload};
use crate::layout::{Template, TemplateKind};
use crate::models::form::FormSubmission;
use crate::models::record::Record;
use crate::render::{render_pdf, RenderedDocument, FILE_NAME, PDF_MIME};
use crate::state::AppState;

pub const RENDER_WARNINGS_HEADER: HeaderName = HeaderName::from_static("x-render-warnings");

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub template: Option<TemplateKind>,
}

/// POST /api/v1/render
///
/// Renders a record posted as JSON.
pub async fn handle_render(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(record): Json<Record>,
) -> Result<Response, AppError> {
    let kind = query.template.unwrap_or(state.config.template);
    render_response(&state, record, kind).await
}

/// POST /api/v1/convert
///
/// Extracts a record from a .docx upload and renders it in one step.
pub async fn handle_convert(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let bytes = read_upload(multipart).await?;
    let extraction = extract_upload(bytes, &state).await?;
    let kind = query.template.unwrap_or(state.config.template);
    render_response(&state, extraction.record, kind).await
}

/// POST /api/v1/form
///
/// Validates a form submission, then renders it. Forms default to the structured
/// template because their entries are built with sub-fields.
pub async fn handle_form(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(submission): Json<FormSubmission>,
) -> Result<Response, AppError> {
    let record = submission.into_record()?;
    let kind = query.template.unwrap_or(TemplateKind::Structured);
    render_response(&state, record, kind).await
}

async fn render_response(
    state: &AppState,
    record: Record,
    kind: TemplateKind,
) -> Result<Response, AppError> {
    let render_id = Uuid::new_v4();
    let span = info_span!("render", %render_id, template = ?kind);
    let page_config = state.page_config.clone();

    let document = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        render_pdf(&record, &Template::for_kind(kind), &page_config, Utc::now())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in render: {e}")))??;

    if !document.warnings.is_empty() {
        warn!(
            %render_id,
            count = document.warnings.len(),
            warnings = ?document.warnings,
            "entries dropped during render"
        );
    }
    info!(%render_id, pages = document.page_count, "pdf ready");

    pdf_response(document)
}

fn pdf_response(document: RenderedDocument) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{FILE_NAME}\""))
        .map_err(|e| AppError::Internal(e.into()))?;
    let warning_count = document.warnings.len();

    let mut response = document.bytes.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PDF_MIME));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(RENDER_WARNINGS_HEADER, HeaderValue::from(warning_count));
    Ok(response)
}
