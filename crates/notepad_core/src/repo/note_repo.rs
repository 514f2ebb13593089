//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide note CRUD on top of one [`Session`].
//! - Run each mutation as one unit of work saved before returning.
//!
//! # Invariants
//! - Edits go through [`Note::edit`], so coercions and `edited_at` apply.
//! - A note is never written with a `folder_id` that has no folder row.
//! - Missing ids are no-ops, not errors.

use crate::db::Session;
use crate::model::color::TagColor;
use crate::model::folder::{FolderId, DEFAULT_FOLDER_ID};
use crate::model::note::{Note, NoteId};
use crate::repo::{RepoError, RepoResult};
use log::{debug, info, warn};

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Returns every note, unordered.
    fn get_all(&self) -> RepoResult<Vec<Note>>;
    /// Persists a constructed note and returns it with its assigned id.
    ///
    /// `None` input is a no-op returning `None`.
    fn add(&self, note: Option<Note>) -> RepoResult<Option<Note>>;
    /// Gets one note by id.
    fn read(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Edits one note in place. No-op when `id` is unknown.
    fn update_fields(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: TagColor,
    ) -> RepoResult<()>;
    /// Copies title/content/tag/color from `replacement` into note `id`.
    ///
    /// No-op when `replacement` is `None` or `id` is unknown.
    fn update(&self, id: NoteId, replacement: Option<&Note>) -> RepoResult<()>;
    /// Removes one note. Returns whether a note was removed.
    fn delete(&self, id: NoteId) -> RepoResult<bool>;
    /// Moves one note into an existing folder.
    ///
    /// Returns `false` without effect when the note or folder is missing.
    fn move_to_folder(&self, id: NoteId, folder_id: FolderId) -> RepoResult<bool>;

    /// Builds a note from raw fields and persists it.
    fn add_new(
        &self,
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: TagColor,
    ) -> RepoResult<Note> {
        self.add(Some(Note::new(title, content, tag, color)))?
            .ok_or(RepoError::InconsistentState("added note missing from result"))
    }
}

impl<T: NoteRepository + ?Sized> NoteRepository for &T {
    fn get_all(&self) -> RepoResult<Vec<Note>> {
        (**self).get_all()
    }

    fn add(&self, note: Option<Note>) -> RepoResult<Option<Note>> {
        (**self).add(note)
    }

    fn read(&self, id: NoteId) -> RepoResult<Option<Note>> {
        (**self).read(id)
    }

    fn update_fields(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: TagColor,
    ) -> RepoResult<()> {
        (**self).update_fields(id, title, content, tag, color)
    }

    fn update(&self, id: NoteId, replacement: Option<&Note>) -> RepoResult<()> {
        (**self).update(id, replacement)
    }

    fn delete(&self, id: NoteId) -> RepoResult<bool> {
        (**self).delete(id)
    }

    fn move_to_folder(&self, id: NoteId, folder_id: FolderId) -> RepoResult<bool> {
        (**self).move_to_folder(id, folder_id)
    }
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'s> {
    session: &'s Session,
}

impl<'s> SqliteNoteRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }

    /// Applies `edit` to note `id` and saves it. No-op when `id` is unknown.
    fn edit_and_save(&self, id: NoteId, edit: impl FnOnce(&mut Note)) -> RepoResult<()> {
        let uow = self.session.unit_of_work()?;
        let Some(mut note) = uow.note(id)? else {
            debug!("event=note_update module=repo status=skip reason=not_found note_id={id}");
            return Ok(());
        };

        edit(&mut note);
        if !uow.update_note(&note)? {
            return Err(RepoError::InconsistentState(
                "note disappeared during update",
            ));
        }
        uow.save()?;

        info!("event=note_update module=repo status=ok note_id={id}");
        Ok(())
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Note>> {
        Ok(self.session.notes()?)
    }

    fn add(&self, note: Option<Note>) -> RepoResult<Option<Note>> {
        let Some(mut note) = note else {
            debug!("event=note_add module=repo status=skip reason=absent_input");
            return Ok(None);
        };

        let uow = self.session.unit_of_work()?;
        if note.folder_id() != DEFAULT_FOLDER_ID && uow.folder(note.folder_id())?.is_none() {
            warn!(
                "event=note_add module=repo status=fallback reason=folder_missing folder_id={}",
                note.folder_id()
            );
            note.move_to(DEFAULT_FOLDER_ID);
        }
        let id = uow.add_note(&mut note)?;
        uow.save()?;

        info!(
            "event=note_add module=repo status=ok note_id={} folder_id={}",
            id,
            note.folder_id()
        );
        Ok(Some(note))
    }

    fn read(&self, id: NoteId) -> RepoResult<Option<Note>> {
        Ok(self.session.note(id)?)
    }

    fn update_fields(
        &self,
        id: NoteId,
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: TagColor,
    ) -> RepoResult<()> {
        self.edit_and_save(id, |note| note.edit(title, content, tag, color))
    }

    fn update(&self, id: NoteId, replacement: Option<&Note>) -> RepoResult<()> {
        let Some(replacement) = replacement else {
            debug!("event=note_update module=repo status=skip reason=absent_input note_id={id}");
            return Ok(());
        };
        self.edit_and_save(id, |note| note.edit_from(replacement))
    }

    fn delete(&self, id: NoteId) -> RepoResult<bool> {
        let uow = self.session.unit_of_work()?;
        if !uow.remove_note(id)? {
            debug!("event=note_delete module=repo status=skip reason=not_found note_id={id}");
            return Ok(false);
        }
        uow.save()?;

        info!("event=note_delete module=repo status=ok note_id={id}");
        Ok(true)
    }

    fn move_to_folder(&self, id: NoteId, folder_id: FolderId) -> RepoResult<bool> {
        let uow = self.session.unit_of_work()?;
        if uow.folder(folder_id)?.is_none() {
            debug!(
                "event=note_move module=repo status=skip reason=folder_missing note_id={id} folder_id={folder_id}"
            );
            return Ok(false);
        }
        if !uow.move_note(id, folder_id)? {
            debug!("event=note_move module=repo status=skip reason=not_found note_id={id}");
            return Ok(false);
        }
        uow.save()?;

        info!("event=note_move module=repo status=ok note_id={id} folder_id={folder_id}");
        Ok(true)
    }
}
