//! The Record - the one value passed from extraction (or form entry) to rendering.

use serde::{Deserialize, Serialize};

/// Contact fields. `None` means the source never supplied the field; the placeholder
/// shown in the document is chosen by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Which contact slot a header keyword fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Linkedin,
    Location,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Linkedin => "linkedin",
            ContactField::Location => "location",
        }
    }
}

impl Contact {
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
            ContactField::Email => self.email.as_deref(),
            ContactField::Linkedin => self.linkedin.as_deref(),
            ContactField::Location => self.location.as_deref(),
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Phone => &mut self.phone,
            ContactField::Email => &mut self.email,
            ContactField::Linkedin => &mut self.linkedin,
            ContactField::Location => &mut self.location,
        };
        *slot = Some(value);
    }
}

/// A titled block of the resume. Summary and skills are single-source sections; the rest
/// hold one entry per source paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Awards,
    Volunteer,
    Languages,
    Additional,
}

impl Section {
    /// Sections holding an ordered list of paragraph entries.
    pub const ENTRY_SECTIONS: [Section; 8] = [
        Section::Experience,
        Section::Education,
        Section::Certifications,
        Section::Projects,
        Section::Awards,
        Section::Volunteer,
        Section::Languages,
        Section::Additional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Certifications => "certifications",
            Section::Projects => "projects",
            Section::Awards => "awards",
            Section::Volunteer => "volunteer",
            Section::Languages => "languages",
            Section::Additional => "additional",
        }
    }

    /// True for sections whose body lines are appended as entries.
    pub fn takes_entries(self) -> bool {
        !matches!(self, Section::Summary | Section::Skills)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
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

impl Record {
    /// The list backing a section. Summary has no list and yields an empty slice.
    pub fn entries(&self, section: Section) -> &[String] {
        match section {
            Section::Summary => &[],
            Section::Skills => &self.skills,
            Section::Experience => &self.experience,
            Section::Education => &self.education,
            Section::Certifications => &self.certifications,
            Section::Projects => &self.projects,
            Section::Awards => &self.awards,
            Section::Volunteer => &self.volunteer,
            Section::Languages => &self.languages,
            Section::Additional => &self.additional,
        }
    }

    /// Mutable access to an entry list; `None` for summary.
    pub fn entries_mut(&mut self, section: Section) -> Option<&mut Vec<String>> {
        match section {
            Section::Summary => None,
            Section::Skills => Some(&mut self.skills),
            Section::Experience => Some(&mut self.experience),
            Section::Education => Some(&mut self.education),
            Section::Certifications => Some(&mut self.certifications),
            Section::Projects => Some(&mut self.projects),
            Section::Awards => Some(&mut self.awards),
            Section::Volunteer => Some(&mut self.volunteer),
            Section::Languages => Some(&mut self.languages),
            Section::Additional => Some(&mut self.additional),
        }
    }

    /// Whether a section would produce any output.
    pub fn has_content(&self, section: Section) -> bool {
        match section {
            Section::Summary => !self.summary.is_empty(),
            other => !self.entries(other).is_empty(),
        }
    }

    /// Every free-text field with a stable path such as `experience[2]`, in document order.
    pub fn text_fields(&self) -> Vec<(String, &str)> {
        let mut fields = Vec::new();
        for field in [
            ContactField::Name,
            ContactField::Phone,
            ContactField::Email,
            ContactField::Linkedin,
            ContactField::Location,
        ] {
            if let Some(value) = self.contact.get(field) {
                fields.push((format!("contact.{}", field.as_str()), value));
            }
        }
        if !self.summary.is_empty() {
            fields.push(("summary".to_string(), self.summary.as_str()));
        }
        for section in std::iter::once(Section::Skills).chain(Section::ENTRY_SECTIONS) {
            for (i, entry) in self.entries(section).iter().enumerate() {
                fields.push((format!("{}[{i}]", section.as_str()), entry.as_str()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_has_no_content() {
        let record = Record::default();
        assert!(!record.has_content(Section::Summary));
        for section in Section::ENTRY_SECTIONS {
            assert!(!record.has_content(section));
        }
        assert!(record.text_fields().is_empty());
    }

    #[test]
    fn test_contact_set_and_get() {
        let mut contact = Contact::default();
        contact.set(ContactField::Email, "jane@example.com".to_string());
        assert_eq!(contact.get(ContactField::Email), Some("jane@example.com"));
        assert_eq!(contact.get(ContactField::Phone), None);
    }

    #[test]
    fn test_summary_has_no_entry_list() {
        let mut record = Record::default();
        assert!(record.entries_mut(Section::Summary).is_none());
        record
            .entries_mut(Section::Awards)
            .unwrap()
            .push("Dean's list".to_string());
        assert_eq!(record.entries(Section::Awards), ["Dean's list".to_string()]);
    }

    #[test]
    fn test_text_field_paths() {
        let record = Record {
            contact: Contact {
                name: Some("Jane".to_string()),
                ..Contact::default()
            },
            experience: vec!["a".to_string(), "b".to_string()],
            ..Record::default()
        };
        let paths: Vec<String> = record.text_fields().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, ["contact.name", "experience[0]", "experience[1]"]);
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: Record =
            serde_json::from_str(r#"{"contact": {"name": "Jane"}, "projects": ["p"]}"#).unwrap();
        assert_eq!(record.contact.name.as_deref(), Some("Jane"));
        assert!(record.contact.email.is_none());
        assert_eq!(record.projects, ["p".to_string()]);
        assert!(record.summary.is_empty());
    }
}
