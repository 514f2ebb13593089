//! Session and unit-of-work over one SQLite connection.
//!
//! # Responsibility
//! - Own the connection for the lifetime chosen by the host.
//! - Expose typed reads for notes and folders.
//! - Buffer writes in a [`UnitOfWork`] until [`UnitOfWork::save`].
//!
//! # Invariants
//! - A dropped, unsaved unit of work leaves the file untouched.
//! - Folder removal and note reassignment that share a unit of work are
//!   committed together or not at all.

use super::{open_db, open_db_in_memory, DbResult};
use crate::model::folder::{Folder, FolderContents, FolderId};
use crate::model::note::{Note, NoteId, NoteParts};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    tag,
    color,
    created_at,
    edited_at,
    folder_id
FROM notes";

const FOLDER_SELECT_SQL: &str = "SELECT id, title FROM folders";

/// One open notepad database.
///
/// Construct one per host scope and lend it to the stores. The connection is
/// `!Sync`, so a session cannot be shared across threads.
pub struct Session {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Session {
    /// Opens the database file at `path`, creating it when missing.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
            path: None,
        })
    }

    /// Backing file path. `None` for in-memory sessions.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads every note in insertion order.
    pub fn notes(&self) -> DbResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Loads one note by id.
    pub fn note(&self, id: NoteId) -> DbResult<Option<Note>> {
        load_note(&self.conn, id)
    }

    /// Loads the notes assigned to one folder.
    pub fn notes_in_folder(&self, folder_id: FolderId) -> DbResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE folder_id = ?1 ORDER BY id ASC;"))?;
        let notes = stmt
            .query_map([folder_id], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Loads every folder ordered by id.
    pub fn folders(&self) -> DbResult<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FOLDER_SELECT_SQL} ORDER BY id ASC;"))?;
        let folders = stmt
            .query_map([], folder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(folders)
    }

    /// Loads one folder by id.
    pub fn folder(&self, id: FolderId) -> DbResult<Option<Folder>> {
        load_folder(&self.conn, id)
    }

    /// Loads one folder with its notes.
    pub fn folder_with_notes(&self, id: FolderId) -> DbResult<Option<FolderContents>> {
        let Some(folder) = self.folder(id)? else {
            return Ok(None);
        };
        let notes = self.notes_in_folder(id)?;
        Ok(Some(FolderContents { folder, notes }))
    }

    /// Starts a buffered unit of work.
    ///
    /// Holds the SQLite write lock until saved or dropped.
    pub fn unit_of_work(&self) -> DbResult<UnitOfWork<'_>> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        Ok(UnitOfWork { tx })
    }
}

/// Pending changes against a [`Session`].
///
/// Nothing is durable until [`UnitOfWork::save`]. Dropping rolls back.
pub struct UnitOfWork<'s> {
    tx: Transaction<'s>,
}

impl UnitOfWork<'_> {
    /// Inserts a note and writes the assigned id back into it.
    ///
    /// Any id already present on `note` is replaced.
    pub fn add_note(&self, note: &mut Note) -> DbResult<NoteId> {
        self.tx.execute(
            "INSERT INTO notes (
                title,
                content,
                tag,
                color,
                created_at,
                edited_at,
                folder_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                note.title(),
                note.content(),
                note.tag(),
                note.color().code(),
                note.created_at(),
                note.edited_at(),
                note.folder_id(),
            ],
        )?;
        let id = self.tx.last_insert_rowid();
        note.assign_id(id);
        Ok(id)
    }

    /// Writes the editable fields of a saved note.
    ///
    /// Returns `false` when the note has no id or no row matches.
    pub fn update_note(&self, note: &Note) -> DbResult<bool> {
        let Some(id) = note.id() else {
            return Ok(false);
        };
        let changed = self.tx.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                tag = ?4,
                color = ?5,
                edited_at = ?6
             WHERE id = ?1;",
            params![
                id,
                note.title(),
                note.content(),
                note.tag(),
                note.color().code(),
                note.edited_at(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Loads one note as seen by this unit of work.
    pub fn note(&self, id: NoteId) -> DbResult<Option<Note>> {
        load_note(&self.tx, id)
    }

    pub fn remove_note(&self, id: NoteId) -> DbResult<bool> {
        let changed = self.tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    /// Points one note at another folder.
    pub fn move_note(&self, id: NoteId, folder_id: FolderId) -> DbResult<bool> {
        let changed = self.tx.execute(
            "UPDATE notes SET folder_id = ?2 WHERE id = ?1;",
            params![id, folder_id],
        )?;
        Ok(changed > 0)
    }

    /// Moves every note of folder `from` into folder `to`.
    ///
    /// Returns the number of reassigned notes.
    pub fn reassign_notes(&self, from: FolderId, to: FolderId) -> DbResult<usize> {
        let changed = self.tx.execute(
            "UPDATE notes SET folder_id = ?2 WHERE folder_id = ?1;",
            params![from, to],
        )?;
        Ok(changed)
    }

    /// Inserts a folder and writes the assigned id back into it.
    ///
    /// A folder that already carries an id (the default folder) is inserted
    /// under that id.
    pub fn add_folder(&self, folder: &mut Folder) -> DbResult<FolderId> {
        match folder.id() {
            Some(id) => {
                self.tx.execute(
                    "INSERT INTO folders (id, title) VALUES (?1, ?2);",
                    params![id, folder.title()],
                )?;
                Ok(id)
            }
            None => {
                self.tx
                    .execute("INSERT INTO folders (title) VALUES (?1);", [folder.title()])?;
                let id = self.tx.last_insert_rowid();
                folder.assign_id(id);
                Ok(id)
            }
        }
    }

    /// Writes the title of a saved folder.
    pub fn update_folder(&self, folder: &Folder) -> DbResult<bool> {
        let Some(id) = folder.id() else {
            return Ok(false);
        };
        let changed = self.tx.execute(
            "UPDATE folders SET title = ?2 WHERE id = ?1;",
            params![id, folder.title()],
        )?;
        Ok(changed > 0)
    }

    /// Loads one folder as seen by this unit of work.
    pub fn folder(&self, id: FolderId) -> DbResult<Option<Folder>> {
        load_folder(&self.tx, id)
    }

    /// Deletes a folder row.
    ///
    /// Fails with a foreign-key error while notes still point at it.
    pub fn remove_folder(&self, id: FolderId) -> DbResult<bool> {
        let changed = self.tx.execute("DELETE FROM folders WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    /// Makes all pending changes durable.
    pub fn save(self) -> DbResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn load_note(conn: &Connection, id: NoteId) -> DbResult<Option<Note>> {
    let note = conn
        .query_row(
            &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            note_from_row,
        )
        .optional()?;
    Ok(note)
}

fn load_folder(conn: &Connection, id: FolderId) -> DbResult<Option<Folder>> {
    let folder = conn
        .query_row(
            &format!("{FOLDER_SELECT_SQL} WHERE id = ?1;"),
            [id],
            folder_from_row,
        )
        .optional()?;
    Ok(folder)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note::from_parts(NoteParts {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        tag: row.get("tag")?,
        color_code: row.get("color")?,
        created_at: row.get("created_at")?,
        edited_at: row.get("edited_at")?,
        folder_id: row.get("folder_id")?,
    }))
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder::from_row(row.get("id")?, row.get("title")?))
}
