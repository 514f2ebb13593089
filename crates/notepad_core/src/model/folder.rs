//! Folder domain model.
//!
//! # Invariants
//! - `title` is never empty; empty or absent input becomes
//!   [`FOLDER_TITLE_PLACEHOLDER`].
//! - The folder with [`DEFAULT_FOLDER_ID`] always exists once the host has
//!   seeded it and is never deleted.
//! - A folder does not own a note list; membership lives on
//!   `Note::folder_id` only.

use crate::model::note::Note;
use serde::Serialize;

/// Store-assigned folder identity.
pub type FolderId = i64;

/// Reserved id of the folder every note falls back to.
pub const DEFAULT_FOLDER_ID: FolderId = 1;

/// Title of the seeded default folder.
pub const DEFAULT_FOLDER_TITLE: &str = "Default";

/// Title used when a folder is created or renamed without one.
pub const FOLDER_TITLE_PLACEHOLDER: &str = "PLACEHOLDER TITLE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    id: Option<FolderId>,
    title: String,
}

impl Folder {
    /// Creates an unsaved folder.
    pub fn new(title: Option<&str>) -> Self {
        Self {
            id: None,
            title: coerce_title(title),
        }
    }

    /// The reserved default folder record, used for host bootstrap.
    pub fn default_folder() -> Self {
        Self {
            id: Some(DEFAULT_FOLDER_ID),
            title: DEFAULT_FOLDER_TITLE.to_string(),
        }
    }

    pub(crate) fn from_row(id: FolderId, title: Option<String>) -> Self {
        Self {
            id: Some(id),
            title: coerce_title(title.as_deref()),
        }
    }

    /// Renames the folder, applying the same coercion as [`Folder::new`].
    pub fn change_title(&mut self, new_title: Option<&str>) {
        self.title = coerce_title(new_title);
    }

    pub fn id(&self) -> Option<FolderId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether this is the protected default folder.
    pub fn is_default(&self) -> bool {
        self.id == Some(DEFAULT_FOLDER_ID)
    }

    pub(crate) fn assign_id(&mut self, id: FolderId) {
        self.id = Some(id);
    }
}

/// A folder together with the notes currently assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderContents {
    pub folder: Folder,
    pub notes: Vec<Note>,
}

fn coerce_title(title: Option<&str>) -> String {
    match title {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => FOLDER_TITLE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Folder, DEFAULT_FOLDER_ID, FOLDER_TITLE_PLACEHOLDER};

    #[test]
    fn new_folder_title_is_coerced() {
        assert_eq!(Folder::new(Some("Work")).title(), "Work");
        assert_eq!(Folder::new(Some("")).title(), FOLDER_TITLE_PLACEHOLDER);
        assert_eq!(Folder::new(None).title(), FOLDER_TITLE_PLACEHOLDER);
        assert_eq!(Folder::new(Some("Work")).id(), None);
    }

    #[test]
    fn change_title_applies_coercion() {
        let mut folder = Folder::new(Some("Work"));
        folder.change_title(Some("Home"));
        assert_eq!(folder.title(), "Home");
        folder.change_title(None);
        assert_eq!(folder.title(), FOLDER_TITLE_PLACEHOLDER);
    }

    #[test]
    fn default_folder_uses_reserved_id() {
        let folder = Folder::default_folder();
        assert_eq!(folder.id(), Some(DEFAULT_FOLDER_ID));
        assert!(folder.is_default());
        assert!(!Folder::new(Some("x")).is_default());
    }
}
