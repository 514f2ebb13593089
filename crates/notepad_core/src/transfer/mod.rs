//! Single-note import/export.
//!
//! # Responsibility
//! - Serialize one note to the `.dno` JSON document or to plain text.
//! - Parse and structurally validate `.dno` documents and text files.
//! - Build imported notes through [`Note::new`] so coercions still apply.
//!
//! # Invariants
//! - A `.dno` document has exactly the keys `Information`, `Version`, `Note`
//!   and the note exactly `Title`, `Content`, `Tag`, `Color`.
//! - `Version` is an integer `>= 1`; `Color` is a [`TagColor`] name.

mod dno;

use crate::model::color::TagColor;
use crate::model::note::Note;
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub use dno::{export_dno, import_dno, DNO_INFORMATION, DNO_VERSION};

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    /// Input is not well-formed JSON or does not match the document shape.
    Json(serde_json::Error),
    /// Input parsed but violates a document rule.
    InvalidDocument(String),
    Repo(RepoError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed note document: {err}"),
            Self::InvalidDocument(message) => write!(f, "invalid note document: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidDocument(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RepoError> for TransferError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Export file flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Structured `.dno` JSON document.
    Dno,
    /// Plain `.txt` with the note content only.
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Dno => "dno",
            ExportFormat::Text => "txt",
        }
    }
}

/// Plain-text export: the note content.
pub fn export_txt(note: &Note) -> String {
    note.content().to_string()
}

/// Renders `note` in the requested format.
pub fn export(note: &Note, format: ExportFormat) -> TransferResult<String> {
    match format {
        ExportFormat::Dno => export_dno(note),
        ExportFormat::Text => Ok(export_txt(note)),
    }
}

/// `<title>.<ext>`, with path separators in the title replaced.
pub fn suggested_file_name(note: &Note, format: ExportFormat) -> String {
    let stem: String = note
        .title()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("{stem}.{}", format.extension())
}

/// Writes `note` into `dir` under its suggested file name.
pub fn write_export(note: &Note, format: ExportFormat, dir: &Path) -> TransferResult<PathBuf> {
    let path = dir.join(suggested_file_name(note, format));
    std::fs::write(&path, export(note, format)?)?;
    Ok(path)
}

/// Builds a note from a text file: title from the file stem, body as content.
pub fn import_txt(file_name: &str, content: &str) -> Note {
    let title = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str());
    Note::new(title, Some(content), Some(""), TagColor::None)
}

/// Reads a note file, dispatching on its extension.
///
/// `.dno`/`.dzoniec` are parsed as documents, `.txt` as text. Other
/// extensions yield `Ok(None)`.
pub fn import_file(path: &Path) -> TransferResult<Option<Note>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("dno") | Some("dzoniec") => {
            let text = std::fs::read_to_string(path)?;
            Ok(Some(import_dno(&text)?))
        }
        Some("txt") => {
            let text = std::fs::read_to_string(path)?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            Ok(Some(import_txt(file_name, &text)))
        }
        _ => Ok(None),
    }
}

/// Imports a note file and adds it to `repo`.
///
/// Returns the stored note, or `None` for unsupported extensions.
pub fn import_into<R: NoteRepository>(repo: &R, path: &Path) -> TransferResult<Option<Note>> {
    let Some(note) = import_file(path)? else {
        info!("event=note_import module=transfer status=skip reason=unsupported_extension");
        return Ok(None);
    };
    let stored = repo.add(Some(note))?;
    if let Some(note) = stored.as_ref() {
        info!(
            "event=note_import module=transfer status=ok note_id={}",
            note.id().unwrap_or_default()
        );
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::{export_txt, import_txt, suggested_file_name, ExportFormat};
    use crate::model::color::TagColor;
    use crate::model::note::Note;

    #[test]
    fn txt_import_takes_title_from_file_stem() {
        let note = import_txt("groceries.txt", "milk\neggs");
        assert_eq!(note.title(), "groceries");
        assert_eq!(note.content(), "milk\neggs");
        assert_eq!(note.tag(), "");
        assert_eq!(note.color(), TagColor::None);
    }

    #[test]
    fn txt_import_without_stem_uses_placeholder() {
        let note = import_txt("", "body");
        assert_eq!(note.title(), "TITLE PLACEHOLDER");
    }

    #[test]
    fn txt_export_is_content_only() {
        let note = Note::new(Some("t"), Some("body"), Some("tag"), TagColor::Red);
        assert_eq!(export_txt(&note), "body");
    }

    #[test]
    fn suggested_file_name_replaces_separators() {
        let note = Note::new(Some("a/b:c"), None, None, TagColor::None);
        assert_eq!(suggested_file_name(&note, ExportFormat::Dno), "a_b_c.dno");
        assert_eq!(suggested_file_name(&note, ExportFormat::Text), "a_b_c.txt");
    }
}
