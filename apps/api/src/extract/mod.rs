// Extraction: .docx paragraphs -> Record, via the header keyword table.
// Never fails on content; unplaceable lines come back as warnings.

pub mod classifier;
pub mod docx;
pub mod handlers;
pub mod keywords;

pub use classifier::{extract_lines, Extraction};
pub use keywords::HeaderMatch;

/// Reads a .docx upload and extracts a record from its body paragraphs.
pub fn extract_docx(bytes: &[u8], mode: HeaderMatch) -> Result<Extraction, docx::DocxError> {
    let paragraphs = docx::read_paragraphs(bytes)?;
    Ok(extract_lines(paragraphs, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::tests::{document_xml, make_docx, paragraphs_xml};

    #[test]
    fn test_extract_docx_end_to_end() {
        let xml = document_xml(&paragraphs_xml(&[
            "Full Name: Jane Doe",
            "Email Address: jane@example.com",
            "",
            "Key Skills: Go, Rust",
            "Education",
            "MSc, TU Berlin, 2019",
        ]));
        let out = extract_docx(&make_docx(&xml), HeaderMatch::Contains).unwrap();
        assert_eq!(out.record.contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(out.record.contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(out.record.skills, ["Go", " Rust"]);
        assert_eq!(out.record.education, ["MSc, TU Berlin, 2019"]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_extract_docx_propagates_container_errors() {
        assert!(extract_docx(b"PK\x03\x04 truncated", HeaderMatch::Contains).is_err());
    }
}
