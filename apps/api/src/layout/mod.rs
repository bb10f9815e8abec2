// Layout: turns a Record into positioned lines on US Letter pages.
// Templates describe what goes where; flow does word wrap and pagination.
// CPU-bound work; the HTTP layer calls it inside tokio::task::spawn_blocking.

pub mod flow;
pub mod font_metrics;
pub mod template;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::record::{ContactField, Record, Section};
use flow::{flow, Flowable, FlowOutput, Frame, PlacedLine, Span};
use template::{
    Column, ColumnMode, EntryFormat, SectionSpec, BODY_STYLE, CONTACT_SEPARATOR, CONTACT_STYLE,
    MISSING_FIELD_PLACEHOLDER, NAME_STYLE, SPACE_AFTER_BLOCK_PT, SPACE_AFTER_ENTRY_PT,
    SPACE_AFTER_TITLE_PT, TITLE_STYLE,
};

pub use font_metrics::{default_page_config, FontFamily, FontWeight, PageConfig};
pub use template::{Template, TemplateKind};

/// Content the layout left out. Rendering still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderWarning {
    /// A labeled entry had fewer `:`-separated parts than the template has labels.
    DroppedEntry {
        field: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub pages: Vec<PageLayout>,
    pub warnings: Vec<RenderWarning>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Plain text of every line, page by page.
    #[cfg(test)]
    pub fn text_lines(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter().map(PlacedLine::text))
            .collect()
    }
}

/// Lays out a record with a template.
///
/// Sections are visited in template order and skipped when the record has nothing for
/// them, so an empty record yields the header block alone.
pub fn layout_record(record: &Record, template: &Template, page: &PageConfig) -> Layout {
    let mut warnings = Vec::new();
    let header = header_story(record);

    let mut main_story = Vec::new();
    let mut side_story = Vec::new();
    for spec in &template.sections {
        if !record.has_content(spec.section) {
            continue;
        }
        let story = match (template.columns, spec.column) {
            (ColumnMode::Sidebar { .. }, Column::Side) => &mut side_story,
            _ => &mut main_story,
        };
        story.extend(section_story(record, spec, &mut warnings));
    }

    let full_width = Frame {
        x: page.margin_left_pt,
        width: page.text_width_pt(),
        top: page.content_top_pt(),
        bottom: page.margin_bottom_pt,
    };

    let pages = match template.columns {
        ColumnMode::Single => {
            let mut story = header;
            story.extend(main_story);
            flow(&story, &full_width, full_width.top, page.font).pages
        }
        ColumnMode::Sidebar {
            side_width_pt,
            gutter_pt,
        } => {
            let head = flow(&header, &full_width, full_width.top, page.font);
            let side_frame = Frame {
                width: side_width_pt,
                ..full_width
            };
            let main_frame = Frame {
                x: full_width.x + side_width_pt + gutter_pt,
                width: full_width.width - side_width_pt - gutter_pt,
                ..full_width
            };
            let side = flow(&side_story, &side_frame, head.end_cursor, page.font);
            let main = flow(&main_story, &main_frame, head.end_cursor, page.font);
            merge_columns(head, side, main)
        }
    };

    let layout = Layout {
        pages: pages
            .into_iter()
            .map(|lines| PageLayout { lines })
            .collect(),
        warnings,
    };

    debug!(
        template = ?template.kind,
        pages = layout.page_count(),
        warnings = layout.warnings.len(),
        "layout finished"
    );

    layout
}

/// Name, contact line, spacing. Missing contact fields show the placeholder so the
/// contact line always has three separators.
fn header_story(record: &Record) -> Vec<Flowable> {
    let name = contact_text(record, ContactField::Name);
    let contact_line = [
        ContactField::Phone,
        ContactField::Email,
        ContactField::Linkedin,
        ContactField::Location,
    ]
    .iter()
    .map(|&field| contact_text(record, field))
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR);

    vec![
        Flowable::text(name, NAME_STYLE),
        Flowable::text(contact_line, CONTACT_STYLE),
        Flowable::Spacer(SPACE_AFTER_BLOCK_PT),
    ]
}

/// A contact value as drawn: blank or missing values become the placeholder.
pub fn contact_text(record: &Record, field: ContactField) -> &str {
    record
        .contact
        .get(field)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(MISSING_FIELD_PLACEHOLDER)
}

fn section_story(
    record: &Record,
    spec: &SectionSpec,
    warnings: &mut Vec<RenderWarning>,
) -> Vec<Flowable> {
    let mut story = vec![
        Flowable::text(spec.title, TITLE_STYLE),
        Flowable::Spacer(SPACE_AFTER_TITLE_PT),
    ];

    if spec.section == Section::Summary {
        story.push(Flowable::text(record.summary.as_str(), BODY_STYLE));
        story.push(Flowable::Spacer(SPACE_AFTER_BLOCK_PT));
        return story;
    }

    let entries = record.entries(spec.section);
    match spec.format {
        EntryFormat::Joined(separator) => {
            story.push(Flowable::text(entries.join(separator), BODY_STYLE));
            story.push(Flowable::Spacer(SPACE_AFTER_BLOCK_PT));
        }
        EntryFormat::Paragraph => {
            for entry in entries {
                story.push(Flowable::text(entry.as_str(), BODY_STYLE));
                story.push(Flowable::Spacer(SPACE_AFTER_ENTRY_PT));
            }
        }
        EntryFormat::Labeled(labels) => {
            for (i, entry) in entries.iter().enumerate() {
                let parts: Vec<&str> = entry.splitn(labels.len(), ':').map(str::trim).collect();
                if parts.len() < labels.len() {
                    let field = format!("{}[{i}]", spec.section.as_str());
                    warn!(%field, found = parts.len(), "entry dropped: not enough sub-fields");
                    warnings.push(RenderWarning::DroppedEntry {
                        field,
                        expected: labels.len(),
                        found: parts.len(),
                    });
                    continue;
                }
                for (label, value) in labels.iter().zip(parts) {
                    story.push(Flowable::Paragraph {
                        spans: vec![Span::bold(format!("{label}:")), Span::regular(value)],
                        style: BODY_STYLE,
                    });
                }
                story.push(Flowable::Spacer(SPACE_AFTER_ENTRY_PT));
            }
        }
    }

    story
}

/// Header pages first; both columns start on the header's last page.
fn merge_columns(head: FlowOutput, side: FlowOutput, main: FlowOutput) -> Vec<Vec<PlacedLine>> {
    let offset = head.pages.len().saturating_sub(1);
    let total = offset + side.pages.len().max(main.pages.len());

    let mut pages = head.pages;
    pages.resize_with(total.max(pages.len()), Vec::new);
    for (i, lines) in side.pages.into_iter().enumerate() {
        pages[offset + i].extend(lines);
    }
    for (i, lines) in main.pages.into_iter().enumerate() {
        pages[offset + i].extend(lines);
    }
    pages
}
