//! Form-entry path: a structured submission validated and flattened into a `Record`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::record::{Contact, Record};

/// Bounds on the number of repeated experience/education blocks a form may carry.
pub const MIN_REPEATED_ENTRIES: usize = 1;
pub const MAX_REPEATED_ENTRIES: usize = 5;

/// Separator between sub-fields of a flattened experience/education entry.
pub const SUBFIELD_DELIMITER: char = ':';
const SUBFIELD_JOINER: &str = ": ";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceForm {
    pub title: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationForm {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSubmission {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    /// Comma-separated, as typed into a single text box.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: Vec<ExperienceForm>,
    #[serde(default)]
    pub education: Vec<EducationForm>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub awards: Vec<String>,
    #[serde(default)]
    pub volunteer: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .problems.join("; "))]
pub struct FormError {
    pub problems: Vec<String>,
}

impl FormSubmission {
    /// Collects every presence/structure problem. Empty means the submission is usable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (label, value) in [
            ("personal.name", &self.personal.name),
            ("personal.phone", &self.personal.phone),
            ("personal.email", &self.personal.email),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{label} is required"));
            }
        }

        check_count("experience", self.experience.len(), &mut problems);
        check_count("education", self.education.len(), &mut problems);

        for (i, job) in self.experience.iter().enumerate() {
            let prefix = format!("experience[{i}]");
            require(&prefix, "title", &job.title, true, &mut problems);
            require(&prefix, "dates", &job.dates, true, &mut problems);
            require(&prefix, "description", &job.description, false, &mut problems);
        }
        for (i, edu) in self.education.iter().enumerate() {
            let prefix = format!("education[{i}]");
            require(&prefix, "degree", &edu.degree, true, &mut problems);
            require(&prefix, "institution", &edu.institution, true, &mut problems);
            require(&prefix, "year", &edu.year, false, &mut problems);
        }

        problems
    }

    /// Validates and flattens the submission. Nothing is produced when any check fails.
    pub fn into_record(self) -> Result<Record, FormError> {
        let problems = self.problems();
        if !problems.is_empty() {
            return Err(FormError { problems });
        }

        let contact = Contact {
            name: non_blank(self.personal.name),
            phone: non_blank(self.personal.phone),
            email: non_blank(self.personal.email),
            linkedin: non_blank(self.personal.linkedin),
            location: non_blank(self.personal.location),
        };

        let skills = if self.skills.trim().is_empty() {
            Vec::new()
        } else {
            self.skills.trim().split(',').map(String::from).collect()
        };

        let experience = self
            .experience
            .into_iter()
            .map(|job| join_subfields(&[&job.title, &job.dates, &job.description]))
            .collect();
        let education = self
            .education
            .into_iter()
            .map(|edu| join_subfields(&[&edu.degree, &edu.institution, &edu.year]))
            .collect();

        Ok(Record {
            contact,
            summary: self.summary.trim().to_string(),
            skills,
            experience,
            education,
            certifications: drop_blank(self.certifications),
            projects: drop_blank(self.projects),
            awards: drop_blank(self.awards),
            volunteer: drop_blank(self.volunteer),
            languages: drop_blank(self.languages),
            additional: drop_blank(self.additional),
        })
    }
}

fn check_count(label: &str, count: usize, problems: &mut Vec<String>) {
    if !(MIN_REPEATED_ENTRIES..=MAX_REPEATED_ENTRIES).contains(&count) {
        problems.push(format!(
            "{label} must have between {MIN_REPEATED_ENTRIES} and {MAX_REPEATED_ENTRIES} entries, got {count}"
        ));
    }
}

/// `delimiter_free` fields sit before the last sub-field and must not contain the delimiter,
/// or the entry would split differently at render time.
fn require(
    prefix: &str,
    field: &str,
    value: &str,
    delimiter_free: bool,
    problems: &mut Vec<String>,
) {
    if value.trim().is_empty() {
        problems.push(format!("{prefix}.{field} is required"));
    } else if delimiter_free && value.contains(SUBFIELD_DELIMITER) {
        problems.push(format!(
            "{prefix}.{field} must not contain '{SUBFIELD_DELIMITER}'"
        ));
    }
}

fn join_subfields(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join(SUBFIELD_JOINER)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn drop_blank(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
