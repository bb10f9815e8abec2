//! PDF serialization of a finished layout with pdf-writer.
//!
//! Fonts are the non-embedded standard Type 1 faces with WinAnsiEncoding, so glyph widths
//! match the tables used for line breaking. Content streams are left uncompressed.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::{FontWeight, Layout, PageConfig};
use crate::render::encode::encode_win_ansi;
use crate::render::RenderError;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");
const PRODUCER: &str = concat!("resume-api ", env!("CARGO_PKG_VERSION"));

pub struct DocumentInfo<'a> {
    pub title: &'a str,
    pub created: DateTime<Utc>,
}

/// Writes every page of the layout. An empty layout still yields one blank page.
pub fn write_pdf(
    layout: &Layout,
    page_config: &PageConfig,
    info: &DocumentInfo<'_>,
) -> Result<Vec<u8>, RenderError> {
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let page_tree_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let info_id = alloc();

    let page_count = layout.pages.len().max(1);
    let page_ids: Vec<(Ref, Ref)> = (0..page_count).map(|_| (alloc(), alloc())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|&(page_id, _)| page_id))
        .count(page_count as i32);

    let family = page_config.font;
    pdf.type1_font(regular_id)
        .base_font(Name(family.base_font(FontWeight::Regular).as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(family.base_font(FontWeight::Bold).as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let media_box = Rect::new(0.0, 0.0, page_config.page_width_pt, page_config.page_height_pt);

    for (index, &(page_id, content_id)) in page_ids.iter().enumerate() {
        let mut content = Content::new();
        if let Some(page) = layout.pages.get(index) {
            for line in &page.lines {
                for run in &line.runs {
                    let bytes = encode_win_ansi(&run.text).map_err(|character| {
                        RenderError::UnencodableCharacter {
                            field: format!("page {}", index + 1),
                            character,
                        }
                    })?;
                    let font = match run.weight {
                        FontWeight::Regular => REGULAR_FONT,
                        FontWeight::Bold => BOLD_FONT,
                    };
                    content.begin_text();
                    content.set_font(font, run.font_size_pt);
                    content.next_line(run.x, line.baseline_y);
                    content.show(Str(&bytes));
                    content.end_text();
                }
            }
        }
        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.parent(page_tree_id)
            .media_box(media_box)
            .contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(REGULAR_FONT, regular_id);
        fonts.pair(BOLD_FONT, bold_id);
        fonts.finish();
        resources.finish();
        page.finish();
    }

    pdf.document_info(info_id)
        .title(TextStr(info.title))
        .producer(TextStr(PRODUCER))
        .creation_date(pdf_date(info.created));

    Ok(pdf.finish())
}

fn pdf_date(at: DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}
