//! Line classifier - folds paragraph lines into a `Record`.
//!
//! Each line is one reducer step: `step(state, line) -> state`. The state carries the
//! section cursor and everything accumulated so far. Extraction is total; lines that
//! cannot be placed are recorded as warnings and otherwise ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::keywords::{classify_header, HeaderMatch, HeaderTarget};
use crate::models::record::{Record, Section};

/// Why a line contributed nothing to the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningReason {
    /// A single-value keyword line without a colon; the field keeps its default.
    MissingColon { field: String },
    /// A single-value keyword line with nothing after the colon; the field keeps its default.
    EmptyValue { field: String },
    /// Body text seen before any section header.
    NoActiveSection,
    /// Body text under summary or skills, which only take an inline value.
    InlineOnlySection { section: Section },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    /// 1-based position in the input.
    pub line: usize,
    pub text: String,
    pub reason: WarningReason,
}

/// Reducer state.
#[derive(Debug, Clone, Default)]
pub struct ExtractState {
    pub current_section: Option<Section>,
    pub record: Record,
    pub warnings: Vec<ExtractionWarning>,
    lines_seen: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub record: Record,
    pub warnings: Vec<ExtractionWarning>,
}

impl From<ExtractState> for Extraction {
    fn from(state: ExtractState) -> Self {
        Extraction {
            record: state.record,
            warnings: state.warnings,
        }
    }
}

/// Runs the classifier over every line.
pub fn extract_lines<I, S>(lines: I, mode: HeaderMatch) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let state = lines
        .into_iter()
        .fold(ExtractState::default(), |state, line| {
            step(state, line.as_ref(), mode)
        });

    debug!(
        lines = state.lines_seen,
        warnings = state.warnings.len(),
        experience = state.record.experience.len(),
        education = state.record.education.len(),
        "extraction finished"
    );

    state.into()
}

/// Classifies one line.
pub fn step(mut state: ExtractState, raw: &str, mode: HeaderMatch) -> ExtractState {
    state.lines_seen += 1;
    let line_no = state.lines_seen;
    let line = raw.trim();

    match classify_header(line, mode).map(|k| k.target) {
        Some(HeaderTarget::Contact(field)) => {
            let path = format!("contact.{}", field.as_str());
            match inline_value(line) {
                Some("") => state.warn(line_no, line, WarningReason::EmptyValue { field: path }),
                Some(value) => state.record.contact.set(field, value.to_string()),
                None => state.warn(line_no, line, WarningReason::MissingColon { field: path }),
            }
        }
        Some(HeaderTarget::Section(section)) => {
            state.current_section = Some(section);
            match (section, inline_value(line)) {
                (Section::Summary, Some(value)) if !value.is_empty() => {
                    state.record.summary = value.to_string();
                }
                (Section::Skills, Some(value)) if !value.is_empty() => {
                    state.record.skills = value.split(',').map(String::from).collect();
                }
                _ => {}
            }
        }
        None if line.is_empty() => {}
        None => match state.current_section {
            Some(section) if section.takes_entries() => {
                if let Some(entries) = state.record.entries_mut(section) {
                    entries.push(line.to_string());
                }
            }
            Some(section) => {
                state.warn(line_no, line, WarningReason::InlineOnlySection { section })
            }
            None => state.warn(line_no, line, WarningReason::NoActiveSection),
        },
    }

    state
}

impl ExtractState {
    fn warn(&mut self, line: usize, text: &str, reason: WarningReason) {
        debug!(line, ?reason, "line dropped");
        self.warnings.push(ExtractionWarning {
            line,
            text: text.to_string(),
            reason,
        });
    }
}

/// Everything after the first colon, trimmed.
fn inline_value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}
