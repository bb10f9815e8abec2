// Rendering: Record -> layout -> PDF bytes.
// Synchronous; the HTTP layer runs it inside tokio::task::spawn_blocking.

pub mod encode;
pub mod handlers;
pub mod pdf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::layout::{contact_text, layout_record, PageConfig, RenderWarning, Template};
use crate::models::record::{ContactField, Record};

pub const PDF_MIME: &str = "application/pdf";
pub const FILE_NAME: &str = "generated_resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{field} contains {character:?}, which the standard PDF fonts cannot show")]
    UnencodableCharacter { field: String, character: char },
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<RenderWarning>,
}

/// Renders a record into a complete PDF document.
///
/// Text is checked against the font encoding first, so an unshowable character fails the
/// whole render with the path of the field that holds it.
pub fn render_pdf(
    record: &Record,
    template: &Template,
    page_config: &PageConfig,
    created: DateTime<Utc>,
) -> Result<RenderedDocument, RenderError> {
    encode::check_record(record)?;

    let layout = layout_record(record, template, page_config);
    let title = format!("Resume - {}", contact_text(record, ContactField::Name));

    let bytes = pdf::write_pdf(
        &layout,
        page_config,
        &pdf::DocumentInfo {
            title: &title,
            created,
        },
    )?;

    info!(
        template = ?template.kind,
        pages = layout.page_count(),
        bytes = bytes.len(),
        "resume rendered"
    );

    Ok(RenderedDocument {
        page_count: layout.page_count(),
        bytes,
        warnings: layout.warnings,
    })
}
