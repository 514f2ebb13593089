//! Core persistence and query layer for Notepad.
//! This crate is the single source of truth for note/folder invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;

pub use db::{ensure_default_folder, DbError, DbResult, Session, UnitOfWork};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::TagColor;
pub use model::folder::{
    Folder, FolderContents, FolderId, DEFAULT_FOLDER_ID, DEFAULT_FOLDER_TITLE,
    FOLDER_TITLE_PLACEHOLDER,
};
pub use model::note::{Note, NoteId, NoteInputIssue, NoteParts, NOTE_TITLE_PLACEHOLDER};
pub use repo::folder_repo::{FolderRepository, SqliteFolderRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::query_service::{
    sorted_alphabetically, sorted_alphabetically_desc, sorted_by_date_of_creation,
    sorted_by_date_of_creation_desc, QueryService,
};
pub use transfer::{ExportFormat, TransferError, TransferResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
