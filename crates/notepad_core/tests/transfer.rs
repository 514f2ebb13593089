use notepad_core::db::{ensure_default_folder, Session};
use notepad_core::transfer::{import_file, import_into, write_export};
use notepad_core::{ExportFormat, NoteRepository, SqliteNoteRepository, TagColor, TransferError};
use std::fs;

fn setup() -> Session {
    let session = Session::open_in_memory().unwrap();
    ensure_default_folder(&session).unwrap();
    session
}

#[test]
fn exported_document_imports_as_new_note() {
    let session = setup();
    let repo = SqliteNoteRepository::new(&session);
    let dir = tempfile::tempdir().unwrap();
    let original = repo
        .add_new(Some("Trip"), Some("pack bags"), Some("travel"), TagColor::Green)
        .unwrap();

    let path = write_export(&original, ExportFormat::Dno, dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Trip.dno");

    let imported = import_into(&repo, &path).unwrap().unwrap();
    assert_ne!(imported.id(), original.id());
    assert_eq!(imported.title(), "Trip");
    assert_eq!(imported.content(), "pack bags");
    assert_eq!(imported.tag(), "travel");
    assert_eq!(imported.color(), TagColor::Green);
    assert_eq!(repo.get_all().unwrap().len(), 2);
}

#[test]
fn text_file_imports_with_stem_as_title() {
    let session = setup();
    let repo = SqliteNoteRepository::new(&session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideas.TXT");
    fs::write(&path, "first idea").unwrap();

    let imported = import_into(&repo, &path).unwrap().unwrap();
    assert_eq!(imported.title(), "ideas");
    assert_eq!(imported.content(), "first idea");
    assert_eq!(imported.color(), TagColor::None);
}

#[test]
fn legacy_extension_is_read_as_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.dzoniec");
    fs::write(
        &path,
        r#"{"Information":".dno type format","Version":1,"Note":{"Title":"Old","Content":"c","Tag":"t","Color":"Black"}}"#,
    )
    .unwrap();

    let note = import_file(&path).unwrap().unwrap();
    assert_eq!(note.title(), "Old");
    assert_eq!(note.color(), TagColor::Black);
}

#[test]
fn unsupported_extension_adds_nothing() {
    let session = setup();
    let repo = SqliteNoteRepository::new(&session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.png");
    fs::write(&path, [0_u8, 1, 2]).unwrap();

    assert!(import_into(&repo, &path).unwrap().is_none());
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn invalid_document_is_rejected_before_add() {
    let session = setup();
    let repo = SqliteNoteRepository::new(&session);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dno");
    fs::write(&path, r#"{"Information":"x","Version":1}"#).unwrap();

    let err = import_into(&repo, &path).unwrap_err();
    assert!(matches!(err, TransferError::Json(_)));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = import_file(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, TransferError::Io(_)));
}
