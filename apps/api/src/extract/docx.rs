//! Docx reader - body paragraphs of `word/document.xml` as plain text.
//!
//! Only paragraph text survives: runs are concatenated, `w:tab` becomes `\t`, `w:br` and
//! `w:cr` become `\n`. Paragraphs nested in tables or text boxes (`w:txbxContent`) are not
//! body paragraphs and are skipped, text included. Styles, numbering and images are ignored.

use std::io::{Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a docx container: {0}")]
    Archive(ZipError),

    #[error("docx has no word/document.xml")]
    MissingDocumentXml,

    #[error("failed to read docx: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed word/document.xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl From<ZipError> for DocxError {
    fn from(e: ZipError) -> Self {
        match e {
            ZipError::FileNotFound => DocxError::MissingDocumentXml,
            ZipError::Io(io) => DocxError::Io(io),
            other => DocxError::Archive(other),
        }
    }
}

/// Reads paragraphs from an in-memory upload.
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocxError> {
    read_from(Cursor::new(bytes))
}

fn read_from<R: Read + Seek>(reader: R) -> Result<Vec<String>, DocxError> {
    let mut archive = ZipArchive::new(reader)?;
    let xml = {
        let mut entry = archive.by_name(DOCUMENT_XML)?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        xml
    };
    parse_document_xml(&xml)
}

/// Walks `document.xml` and returns one string per body paragraph, empty ones included.
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Depth inside tables and text boxes; their paragraphs are not body paragraphs.
    let mut skip_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => skip_depth += 1,
                _ if skip_depth > 0 => {}
                b"w:p" => current = Some(String::new()),
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if skip_depth == 0 => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_run => push_char(&mut current, '\t'),
                b"w:br" | b"w:cr" if in_run => push_char(&mut current, '\n'),
                _ => {}
            },
            Event::Text(text) if in_text && skip_depth == 0 => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&text.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => skip_depth = skip_depth.saturating_sub(1),
                _ if skip_depth > 0 => {}
                b"w:p" => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_char(current: &mut Option<String>, c: char) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(c);
    }
}
