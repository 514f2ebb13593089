//! Folder repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide folder create/read/rename/delete on top of one [`Session`].
//! - Own the delete cascade that rehomes notes into the default folder.
//!
//! # Invariants
//! - The default folder is never deleted; the request is ignored.
//! - Deleting any other folder reassigns its notes and removes the folder
//!   in one saved unit of work, so no note ever references a missing folder.

use crate::db::Session;
use crate::model::folder::{Folder, FolderContents, FolderId, DEFAULT_FOLDER_ID};
use crate::repo::RepoResult;
use log::{debug, info};

/// Repository interface for folder operations.
pub trait FolderRepository {
    /// Returns every folder ordered by id.
    fn get_all(&self) -> RepoResult<Vec<Folder>>;
    /// Persists a constructed folder and returns it with its assigned id.
    fn add(&self, folder: Folder) -> RepoResult<Folder>;
    /// Gets one folder with its notes loaded.
    fn read(&self, id: FolderId) -> RepoResult<Option<FolderContents>>;
    /// Renames one folder. No-op when `id` is unknown.
    fn update(&self, id: FolderId, new_title: Option<&str>) -> RepoResult<()>;
    /// Deletes one folder, rehoming its notes into the default folder.
    ///
    /// Returns `false` for the default folder and for unknown ids.
    fn delete(&self, id: FolderId) -> RepoResult<bool>;

    /// Builds a folder from a raw title and persists it.
    fn add_titled(&self, title: Option<&str>) -> RepoResult<Folder> {
        self.add(Folder::new(title))
    }
}

/// SQLite-backed folder repository.
pub struct SqliteFolderRepository<'s> {
    session: &'s Session,
}

impl<'s> SqliteFolderRepository<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self { session }
    }
}

impl FolderRepository for SqliteFolderRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Folder>> {
        Ok(self.session.folders()?)
    }

    fn add(&self, mut folder: Folder) -> RepoResult<Folder> {
        let uow = self.session.unit_of_work()?;
        let id = uow.add_folder(&mut folder)?;
        uow.save()?;

        info!("event=folder_add module=repo status=ok folder_id={id}");
        Ok(folder)
    }

    fn read(&self, id: FolderId) -> RepoResult<Option<FolderContents>> {
        Ok(self.session.folder_with_notes(id)?)
    }

    fn update(&self, id: FolderId, new_title: Option<&str>) -> RepoResult<()> {
        let uow = self.session.unit_of_work()?;
        let Some(mut folder) = uow.folder(id)? else {
            debug!("event=folder_update module=repo status=skip reason=not_found folder_id={id}");
            return Ok(());
        };

        folder.change_title(new_title);
        uow.update_folder(&folder)?;
        uow.save()?;

        info!("event=folder_update module=repo status=ok folder_id={id}");
        Ok(())
    }

    fn delete(&self, id: FolderId) -> RepoResult<bool> {
        if id == DEFAULT_FOLDER_ID {
            debug!("event=folder_delete module=repo status=skip reason=default_folder folder_id={id}");
            return Ok(false);
        }

        let uow = self.session.unit_of_work()?;
        if uow.folder(id)?.is_none() {
            debug!("event=folder_delete module=repo status=skip reason=not_found folder_id={id}");
            return Ok(false);
        }

        let reassigned = uow.reassign_notes(id, DEFAULT_FOLDER_ID)?;
        uow.remove_folder(id)?;
        uow.save()?;

        info!(
            "event=folder_delete module=repo status=ok folder_id={} reassigned_notes={}",
            id, reassigned
        );
        Ok(true)
    }
}
