//! `.dno` JSON document codec.

use super::{TransferError, TransferResult};
use crate::model::color::TagColor;
use crate::model::note::Note;
use serde::{Deserialize, Serialize};

/// Value of the `Information` field written on export.
pub const DNO_INFORMATION: &str = ".dno type format";

/// Document version written on export.
pub const DNO_VERSION: i64 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
struct DnoDocument {
    information: String,
    version: i64,
    note: DnoNote,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
struct DnoNote {
    title: String,
    content: String,
    tag: String,
    color: String,
}

/// Serializes one note as a `.dno` document.
pub fn export_dno(note: &Note) -> TransferResult<String> {
    let document = DnoDocument {
        information: DNO_INFORMATION.to_string(),
        version: DNO_VERSION,
        note: DnoNote {
            title: note.title().to_string(),
            content: note.content().to_string(),
            tag: note.tag().to_string(),
            color: note.color().as_str().to_string(),
        },
    };
    Ok(serde_json::to_string(&document)?)
}

/// Parses and validates a `.dno` document into an unsaved note.
pub fn import_dno(text: &str) -> TransferResult<Note> {
    let document: DnoDocument = serde_json::from_str(text)?;

    if document.version < 1 {
        return Err(TransferError::InvalidDocument(format!(
            "Version must be >= 1, got {}",
            document.version
        )));
    }

    let color = TagColor::from_name(&document.note.color).ok_or_else(|| {
        TransferError::InvalidDocument(format!(
            "unsupported Color `{}`",
            document.note.color
        ))
    })?;

    let note = document.note;
    Ok(Note::new(
        Some(note.title.as_str()),
        Some(note.content.as_str()),
        Some(note.tag.as_str()),
        color,
    ))
}

#[cfg(test)]
mod tests {
    use super::{export_dno, import_dno};
    use crate::model::color::TagColor;
    use crate::model::note::Note;
    use crate::transfer::TransferError;

    const VALID: &str = r#"{
        "Information": ".dno type format",
        "Version": 1,
        "Note": {"Title": "Trip", "Content": "pack bags", "Tag": "travel", "Color": "Green"}
    }"#;

    #[test]
    fn export_writes_format_marker_and_color_name() {
        let note = Note::new(Some("Trip"), Some("pack"), Some("travel"), TagColor::Yellow);
        let json: serde_json::Value =
            serde_json::from_str(&export_dno(&note).unwrap()).unwrap();
        assert_eq!(json["Information"], ".dno type format");
        assert_eq!(json["Version"], 1);
        assert_eq!(json["Note"]["Title"], "Trip");
        assert_eq!(json["Note"]["Color"], "Yellow");
    }

    #[test]
    fn import_accepts_valid_document() {
        let note = import_dno(VALID).unwrap();
        assert_eq!(note.title(), "Trip");
        assert_eq!(note.content(), "pack bags");
        assert_eq!(note.tag(), "travel");
        assert_eq!(note.color(), TagColor::Green);
        assert_eq!(note.id(), None);
    }

    #[test]
    fn import_applies_title_coercion() {
        let text = r#"{"Information":"x","Version":2,"Note":{"Title":"","Content":"","Tag":"","Color":"None"}}"#;
        let note = import_dno(text).unwrap();
        assert_eq!(note.title(), "TITLE PLACEHOLDER");
    }

    #[test]
    fn import_rejects_missing_and_extra_keys() {
        let missing = r#"{"Information":"x","Version":1,"Note":{"Title":"t","Content":"","Tag":""}}"#;
        assert!(matches!(import_dno(missing), Err(TransferError::Json(_))));

        let extra = r#"{"Information":"x","Version":1,"Extra":true,"Note":{"Title":"t","Content":"","Tag":"","Color":"Red"}}"#;
        assert!(matches!(import_dno(extra), Err(TransferError::Json(_))));
    }

    #[test]
    fn import_rejects_bad_version_and_color() {
        let version = r#"{"Information":"x","Version":0,"Note":{"Title":"t","Content":"","Tag":"","Color":"Red"}}"#;
        assert!(matches!(
            import_dno(version),
            Err(TransferError::InvalidDocument(_))
        ));

        let fractional = r#"{"Information":"x","Version":1.5,"Note":{"Title":"t","Content":"","Tag":"","Color":"Red"}}"#;
        assert!(matches!(import_dno(fractional), Err(TransferError::Json(_))));

        let color = r#"{"Information":"x","Version":1,"Note":{"Title":"t","Content":"","Tag":"","Color":"Purple"}}"#;
        assert!(matches!(
            import_dno(color),
            Err(TransferError::InvalidDocument(_))
        ));
    }

    #[test]
    fn export_then_import_keeps_fields() {
        let note = Note::new(Some("T"), Some("C"), Some("G"), TagColor::Black);
        let imported = import_dno(&export_dno(&note).unwrap()).unwrap();
        assert_eq!(imported.title(), "T");
        assert_eq!(imported.color(), TagColor::Black);
    }
}
