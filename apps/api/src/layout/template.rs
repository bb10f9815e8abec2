//! Templates - one declarative description per visual variant.
//!
//! A template is an ordered list of section specs plus a column arrangement. The layout
//! routine walks the list in order, so the section order of every document is fixed by
//! the template and never by the record.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontWeight;
use crate::models::record::Section;

/// Vertical spacings, in points (0.25 in, 0.15 in, 0.1 in).
pub const SPACE_AFTER_BLOCK_PT: f32 = 18.0;
pub const SPACE_AFTER_ENTRY_PT: f32 = 10.8;
pub const SPACE_AFTER_TITLE_PT: f32 = 7.2;

/// Placeholder drawn for a contact field the record does not have.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";
pub const CONTACT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub font_size_pt: f32,
    pub leading_pt: f32,
    /// Dropped when the paragraph opens a page.
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    /// Never leave this paragraph as the last thing on a page.
    pub keep_with_next: bool,
}

pub const NAME_STYLE: TextStyle = TextStyle {
    weight: FontWeight::Bold,
    font_size_pt: 18.0,
    leading_pt: 22.0,
    space_before_pt: 0.0,
    space_after_pt: 6.0,
    keep_with_next: true,
};

pub const CONTACT_STYLE: TextStyle = TextStyle {
    weight: FontWeight::Regular,
    font_size_pt: 12.0,
    leading_pt: 14.0,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
    keep_with_next: false,
};

pub const TITLE_STYLE: TextStyle = TextStyle {
    weight: FontWeight::Bold,
    font_size_pt: 14.0,
    leading_pt: 18.0,
    space_before_pt: 12.0,
    space_after_pt: 6.0,
    keep_with_next: true,
};

pub const BODY_STYLE: TextStyle = TextStyle {
    weight: FontWeight::Regular,
    font_size_pt: 12.0,
    leading_pt: 14.0,
    space_before_pt: 0.0,
    space_after_pt: 0.0,
    keep_with_next: false,
};

/// How the entries of a section turn into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    /// One plain paragraph per entry (summary: the single string).
    Paragraph,
    /// All entries joined into one paragraph with the separator.
    Joined(&'static str),
    /// Each entry is split on `:` into exactly `labels.len()` parts, one bold-label line
    /// per part. Entries with fewer parts are dropped.
    Labeled(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Main,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnMode {
    Single,
    /// Narrow left column of `side_width_pt`, then `gutter_pt`, then the main column.
    Sidebar { side_width_pt: f32, gutter_pt: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub section: Section,
    pub title: &'static str,
    pub format: EntryFormat,
    pub column: Column,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Single column, one plain paragraph per entry.
    #[default]
    Classic,
    /// Single column; experience and education split into labeled sub-lines.
    Structured,
    /// Structured entries with skills, languages and certifications in a side column.
    Sidebar,
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(TemplateKind::Classic),
            "structured" => Ok(TemplateKind::Structured),
            "sidebar" => Ok(TemplateKind::Sidebar),
            other => Err(format!("unknown template '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub kind: TemplateKind,
    pub columns: ColumnMode,
    pub sections: Vec<SectionSpec>,
}

pub const EXPERIENCE_LABELS: &[&str] = &[
    "Job Title",
    "Dates of Employment",
    "Responsibilities & Achievements",
];
pub const EDUCATION_LABELS: &[&str] = &["Degree", "Institution", "Year of Graduation"];

/// Fixed rendering order and titles shared by every template.
const SECTION_TITLES: [(Section, &str); 10] = [
    (Section::Summary, "Professional Summary:"),
    (Section::Skills, "Key Skills:"),
    (Section::Experience, "Professional Experience:"),
    (Section::Education, "Education:"),
    (Section::Certifications, "Certifications:"),
    (Section::Projects, "Projects:"),
    (Section::Awards, "Awards:"),
    (Section::Volunteer, "Volunteer Work:"),
    (Section::Languages, "Languages:"),
    (Section::Additional, "Additional Sections:"),
];

impl Template {
    pub fn for_kind(kind: TemplateKind) -> Self {
        let sections = SECTION_TITLES
            .iter()
            .map(|&(section, title)| SectionSpec {
                section,
                title,
                format: entry_format(kind, section),
                column: column_for(kind, section),
            })
            .collect();

        let columns = match kind {
            TemplateKind::Classic | TemplateKind::Structured => ColumnMode::Single,
            TemplateKind::Sidebar => ColumnMode::Sidebar {
                side_width_pt: 144.0,
                gutter_pt: 18.0,
            },
        };

        Template {
            kind,
            columns,
            sections,
        }
    }
}

fn entry_format(kind: TemplateKind, section: Section) -> EntryFormat {
    match (kind, section) {
        (TemplateKind::Sidebar, Section::Skills) => EntryFormat::Paragraph,
        (_, Section::Skills) => EntryFormat::Joined(", "),
        (TemplateKind::Classic, _) => EntryFormat::Paragraph,
        (_, Section::Experience) => EntryFormat::Labeled(EXPERIENCE_LABELS),
        (_, Section::Education) => EntryFormat::Labeled(EDUCATION_LABELS),
        _ => EntryFormat::Paragraph,
    }
}

fn column_for(kind: TemplateKind, section: Section) -> Column {
    match (kind, section) {
        (
            TemplateKind::Sidebar,
            Section::Skills | Section::Languages | Section::Certifications,
        ) => Column::Side,
        _ => Column::Main,
    }
}
