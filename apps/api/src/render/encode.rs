//! WinAnsi (CP-1252) encoding for the non-embedded standard fonts.

use crate::models::record::Record;
use crate::render::RenderError;

/// Code points 0x80..=0x9F of WinAnsiEncoding. `None` marks unassigned slots.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), // €
    None,
    Some('\u{201A}'), // ‚
    Some('\u{0192}'), // ƒ
    Some('\u{201E}'), // „
    Some('\u{2026}'), // …
    Some('\u{2020}'), // †
    Some('\u{2021}'), // ‡
    Some('\u{02C6}'), // ˆ
    Some('\u{2030}'), // ‰
    Some('\u{0160}'), // Š
    Some('\u{2039}'), // ‹
    Some('\u{0152}'), // Œ
    None,
    Some('\u{017D}'), // Ž
    None,
    None,
    Some('\u{2018}'), // ‘
    Some('\u{2019}'), // ’
    Some('\u{201C}'), // “
    Some('\u{201D}'), // ”
    Some('\u{2022}'), // •
    Some('\u{2013}'), // –
    Some('\u{2014}'), // —
    Some('\u{02DC}'), // ˜
    Some('\u{2122}'), // ™
    Some('\u{0161}'), // š
    Some('\u{203A}'), // ›
    Some('\u{0153}'), // œ
    None,
    Some('\u{017E}'), // ž
    Some('\u{0178}'), // Ÿ
];

/// Maps one character to its WinAnsi byte. Tabs and line breaks become spaces.
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        '\t' | '\n' | '\r' => Some(b' '),
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&slot| slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encodes a string, failing on the first character the encoding lacks.
pub fn encode_win_ansi(s: &str) -> Result<Vec<u8>, char> {
    s.chars().map(|c| encode_char(c).ok_or(c)).collect()
}

/// Checks every free-text field of a record before layout starts.
pub fn check_record(record: &Record) -> Result<(), RenderError> {
    for (field, value) in record.text_fields() {
        if let Some(character) = value.chars().find(|&c| encode_char(c).is_none()) {
            return Err(RenderError::UnencodableCharacter { field, character });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_win_ansi("R&D (lead) <x>").unwrap(), b"R&D (lead) <x>");
    }

    #[test]
    fn test_latin1_and_typographic_marks() {
        assert_eq!(encode_win_ansi("é").unwrap(), [0xE9]);
        assert_eq!(encode_win_ansi("€").unwrap(), [0x80]);
        assert_eq!(encode_win_ansi("\u{2013}").unwrap(), [0x96]);
        assert_eq!(encode_win_ansi("\u{2019}").unwrap(), [0x92]);
        assert_eq!(encode_win_ansi("Ÿ").unwrap(), [0x9F]);
    }

    #[test]
    fn test_whitespace_controls_become_spaces() {
        assert_eq!(encode_win_ansi("a\tb\nc").unwrap(), b"a b c");
    }

    #[test]
    fn test_unencodable_character() {
        assert_eq!(encode_win_ansi("Zürich 東京"), Err('東'));
        assert_eq!(encode_char('\u{0}'), None);
    }

    #[test]
    fn test_check_record_names_field() {
        let record = Record {
            experience: vec!["ok".into(), "fine".into(), "Dev ✓".into()],
            ..Record::default()
        };
        let err = check_record(&record).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnencodableCharacter { ref field, character: '✓' } if field == "experience[2]"
        ));
    }

    #[test]
    fn test_check_record_accepts_accents() {
        let mut record = Record::default();
        record.contact.name = Some("José Müller".into());
        record.summary = "Café owner – 10 years".into();
        assert!(check_record(&record).is_ok());
    }
}
