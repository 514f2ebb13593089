//! Host-side seeding of the default folder.
//!
//! Stores never create the default folder themselves; the hosting
//! application calls [`ensure_default_folder`] once after opening a session.

use super::{DbResult, Session};
use crate::model::folder::{Folder, DEFAULT_FOLDER_ID};
use log::info;

/// Inserts the default folder when it is missing.
///
/// Returns `true` when the folder was created by this call.
pub fn ensure_default_folder(session: &Session) -> DbResult<bool> {
    if session.folder(DEFAULT_FOLDER_ID)?.is_some() {
        return Ok(false);
    }

    let uow = session.unit_of_work()?;
    let mut folder = Folder::default_folder();
    uow.add_folder(&mut folder)?;
    uow.save()?;

    info!(
        "event=default_folder_seed module=db status=ok folder_id={}",
        DEFAULT_FOLDER_ID
    );
    Ok(true)
}
