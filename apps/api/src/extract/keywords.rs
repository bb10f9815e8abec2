//! Header keyword table. Order is priority: the first keyword found in a line wins.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::record::{ContactField, Section};

/// What a header line feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    /// Single-value contact field; needs a colon on the same line.
    Contact(ContactField),
    /// Opens a section. Summary and skills may also carry an inline value after a colon.
    Section(Section),
}

#[derive(Debug, Clone, Copy)]
pub struct HeaderKeyword {
    pub keyword: &'static str,
    pub target: HeaderTarget,
}

const fn contact(keyword: &'static str, field: ContactField) -> HeaderKeyword {
    HeaderKeyword {
        keyword,
        target: HeaderTarget::Contact(field),
    }
}

const fn section(keyword: &'static str, section: Section) -> HeaderKeyword {
    HeaderKeyword {
        keyword,
        target: HeaderTarget::Section(section),
    }
}

/// Contact fields first, then sections.
pub static HEADER_KEYWORDS: [HeaderKeyword; 15] = [
    contact("Full Name", ContactField::Name),
    contact("Phone Number", ContactField::Phone),
    contact("Email Address", ContactField::Email),
    contact("LinkedIn Profile", ContactField::Linkedin),
    contact("Location", ContactField::Location),
    section("Professional Summary", Section::Summary),
    section("Key Skills", Section::Skills),
    section("Professional Experience", Section::Experience),
    section("Education", Section::Education),
    section("Certifications", Section::Certifications),
    section("Projects", Section::Projects),
    section("Awards", Section::Awards),
    section("Volunteer Work", Section::Volunteer),
    section("Languages", Section::Languages),
    section("Additional", Section::Additional),
];

/// How a keyword must appear in a line to count as a header. Both are case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMatch {
    /// Keyword anywhere in the line. Body text mentioning a keyword becomes a header.
    #[default]
    Contains,
    /// Keyword must open the line.
    StartsWith,
}

impl HeaderMatch {
    pub fn matches(self, line: &str, keyword: &str) -> bool {
        match self {
            HeaderMatch::Contains => line.contains(keyword),
            HeaderMatch::StartsWith => line.starts_with(keyword),
        }
    }
}

impl FromStr for HeaderMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" | "substring" => Ok(HeaderMatch::Contains),
            "starts_with" | "prefix" => Ok(HeaderMatch::StartsWith),
            other => Err(format!(
                "unknown header match mode '{other}' (expected 'contains' or 'starts_with')"
            )),
        }
    }
}

/// Finds the highest-priority keyword for a (trimmed) line.
pub fn classify_header(line: &str, mode: HeaderMatch) -> Option<&'static HeaderKeyword> {
    HEADER_KEYWORDS
        .iter()
        .find(|entry| mode.matches(line, entry.keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_keywords_take_priority() {
        // Mentions both a contact keyword and a section keyword.
        let hit = classify_header("Location of Education: Paris", HeaderMatch::Contains).unwrap();
        assert_eq!(hit.target, HeaderTarget::Contact(ContactField::Location));
    }

    #[test]
    fn test_substring_match_misclassifies_body_text() {
        let hit = classify_header("Led Education outreach for 3 schools", HeaderMatch::Contains)
            .unwrap();
        assert_eq!(hit.target, HeaderTarget::Section(Section::Education));
    }

    #[test]
    fn test_starts_with_ignores_body_mentions() {
        assert!(
            classify_header("Led Education outreach for 3 schools", HeaderMatch::StartsWith)
                .is_none()
        );
        let hit = classify_header("Education", HeaderMatch::StartsWith).unwrap();
        assert_eq!(hit.target, HeaderTarget::Section(Section::Education));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(classify_header("education", HeaderMatch::Contains).is_none());
        assert!(classify_header("FULL NAME: Jane", HeaderMatch::Contains).is_none());
    }

    #[test]
    fn test_additional_matches_longer_titles() {
        let hit = classify_header("Additional Sections", HeaderMatch::Contains).unwrap();
        assert_eq!(hit.target, HeaderTarget::Section(Section::Additional));
    }

    #[test]
    fn test_header_match_from_str() {
        assert_eq!("contains".parse::<HeaderMatch>(), Ok(HeaderMatch::Contains));
        assert_eq!(
            " STARTS_WITH ".parse::<HeaderMatch>(),
            Ok(HeaderMatch::StartsWith)
        );
        assert!("exact".parse::<HeaderMatch>().is_err());
    }
}
