//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its mutation rules.
//! - Normalize invalid field input instead of rejecting it.
//!
//! # Invariants
//! - `title` is never empty; empty or absent input becomes
//!   [`NOTE_TITLE_PLACEHOLDER`].
//! - `content` and `tag` are never absent; absent input becomes `""`.
//! - `color` is always a member of the closed [`TagColor`] set.
//! - `created_at` is fixed at construction; `edited_at` is stamped by every
//!   edit and unset before the first one.
//! - `id` is assigned by the store and never changed afterwards.

use crate::model::color::TagColor;
use crate::model::folder::{FolderId, DEFAULT_FOLDER_ID};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned note identity.
pub type NoteId = i64;

/// Title used when a note is created or edited without one.
pub const NOTE_TITLE_PLACEHOLDER: &str = "TITLE PLACEHOLDER";

/// A single note.
///
/// Fields are private so every write goes through [`Note::new`] or
/// [`Note::edit`], which apply the coercion rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: Option<NoteId>,
    title: String,
    content: String,
    tag: String,
    color: TagColor,
    /// Unix epoch milliseconds.
    created_at: i64,
    /// Unix epoch milliseconds.
    edited_at: Option<i64>,
    folder_id: FolderId,
}

/// Raw field values of a persisted note.
///
/// Used to rebuild a [`Note`] from storage. Coercion rules still apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteParts {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
    pub color_code: i64,
    pub created_at: i64,
    pub edited_at: Option<i64>,
    pub folder_id: FolderId,
}

/// Field that would be silently normalized by [`Note::new`] / [`Note::edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteInputIssue {
    /// Title was empty or absent; the placeholder would be used.
    MissingTitle,
    /// Content was absent; `""` would be used.
    MissingContent,
    /// Tag was absent; `""` would be used.
    MissingTag,
    /// Color code outside the closed set; `TagColor::None` would be used.
    ColorOutOfRange(i64),
}

impl Note {
    /// Creates an unsaved note in the default folder.
    pub fn new(
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: impl Into<TagColor>,
    ) -> Self {
        Self {
            id: None,
            title: coerce_title(title),
            content: content.unwrap_or_default().to_string(),
            tag: tag.unwrap_or_default().to_string(),
            color: color.into(),
            created_at: now_epoch_ms(),
            edited_at: None,
            folder_id: DEFAULT_FOLDER_ID,
        }
    }

    /// Places a not-yet-saved note in another folder.
    ///
    /// The store falls back to the default folder if `folder_id` does not
    /// exist when the note is added.
    pub fn in_folder(mut self, folder_id: FolderId) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// Rebuilds a note from stored field values.
    pub fn from_parts(parts: NoteParts) -> Self {
        Self {
            id: Some(parts.id),
            title: coerce_title(parts.title.as_deref()),
            content: parts.content.unwrap_or_default(),
            tag: parts.tag.unwrap_or_default(),
            color: TagColor::from_code(parts.color_code),
            created_at: parts.created_at,
            edited_at: parts.edited_at,
            folder_id: parts.folder_id,
        }
    }

    /// Replaces the editable fields and stamps `edited_at`.
    ///
    /// Same coercion rules as [`Note::new`].
    pub fn edit(
        &mut self,
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color: impl Into<TagColor>,
    ) {
        self.title = coerce_title(title);
        self.content = content.unwrap_or_default().to_string();
        self.tag = tag.unwrap_or_default().to_string();
        self.color = color.into();
        self.edited_at = Some(now_epoch_ms());
    }

    /// Copies title, content, tag and color from `source`.
    ///
    /// Identity, creation time and folder are kept.
    pub fn edit_from(&mut self, source: &Note) {
        self.edit(
            Some(source.title.as_str()),
            Some(source.content.as_str()),
            Some(source.tag.as_str()),
            source.color,
        );
    }

    /// Reports which inputs the constructor would normalize.
    ///
    /// Construction itself never fails; this is for callers that want to
    /// surface malformed input instead of accepting the coerced value.
    pub fn validate_input(
        title: Option<&str>,
        content: Option<&str>,
        tag: Option<&str>,
        color_code: i64,
    ) -> Vec<NoteInputIssue> {
        let mut issues = Vec::new();
        if title.map_or(true, str::is_empty) {
            issues.push(NoteInputIssue::MissingTitle);
        }
        if content.is_none() {
            issues.push(NoteInputIssue::MissingContent);
        }
        if tag.is_none() {
            issues.push(NoteInputIssue::MissingTag);
        }
        if TagColor::try_from_code(color_code).is_none() {
            issues.push(NoteInputIssue::ColorOutOfRange(color_code));
        }
        issues
    }

    pub fn id(&self) -> Option<NoteId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn color(&self) -> TagColor {
        self.color
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn edited_at(&self) -> Option<i64> {
        self.edited_at
    }

    pub fn folder_id(&self) -> FolderId {
        self.folder_id
    }

    pub(crate) fn assign_id(&mut self, id: NoteId) {
        self.id = Some(id);
    }

    pub(crate) fn move_to(&mut self, folder_id: FolderId) {
        self.folder_id = folder_id;
    }
}

fn coerce_title(title: Option<&str>) -> String {
    match title {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NOTE_TITLE_PLACEHOLDER.to_string(),
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteInputIssue, NoteParts, NOTE_TITLE_PLACEHOLDER};
    use crate::model::color::TagColor;
    use crate::model::folder::DEFAULT_FOLDER_ID;

    fn sample() -> Note {
        Note::new(Some("Title"), Some("Content"), Some("Tag"), TagColor::None)
    }

    #[test]
    fn new_keeps_valid_input() {
        for color in TagColor::ALL {
            let note = Note::new(Some("Title"), Some("Content"), Some("Tag"), color);
            assert_eq!(note.title(), "Title");
            assert_eq!(note.content(), "Content");
            assert_eq!(note.tag(), "Tag");
            assert_eq!(note.color(), color);
            assert!(note.created_at() > 0);
            assert_eq!(note.edited_at(), None);
            assert_eq!(note.folder_id(), DEFAULT_FOLDER_ID);
            assert_eq!(note.id(), None);
        }
    }

    #[test]
    fn new_replaces_missing_or_empty_title() {
        assert_eq!(
            Note::new(None, Some("c"), Some("t"), TagColor::Red).title(),
            NOTE_TITLE_PLACEHOLDER
        );
        assert_eq!(
            Note::new(Some(""), Some("c"), Some("t"), TagColor::Red).title(),
            NOTE_TITLE_PLACEHOLDER
        );
    }

    #[test]
    fn new_coerces_absent_content_and_tag_to_empty() {
        let note = Note::new(Some("Title"), None, None, TagColor::None);
        assert_eq!(note.content(), "");
        assert_eq!(note.tag(), "");
    }

    #[test]
    fn new_coerces_out_of_range_color() {
        for code in [i64::MIN, -1_i64, 6, i64::MAX] {
            let note = Note::new(Some("Title"), Some("c"), Some("t"), code);
            assert_eq!(note.color(), TagColor::None);
        }
        let note = Note::new(Some("Title"), Some("c"), Some("t"), i32::MIN);
        assert_eq!(note.color(), TagColor::None);
    }

    #[test]
    fn edit_replaces_fields_and_stamps_edited_at() {
        for color in TagColor::ALL {
            let mut note = sample();
            note.edit(Some("New Title"), Some("New Content"), Some("New Tag"), color);
            assert_eq!(note.title(), "New Title");
            assert_eq!(note.content(), "New Content");
            assert_eq!(note.tag(), "New Tag");
            assert_eq!(note.color(), color);
            assert!(note.edited_at().is_some());
        }
    }

    #[test]
    fn edit_applies_the_same_coercions_as_new() {
        let mut note = sample();
        note.edit(Some(""), None, None, 6_i64);
        assert_eq!(note.title(), NOTE_TITLE_PLACEHOLDER);
        assert_eq!(note.content(), "");
        assert_eq!(note.tag(), "");
        assert_eq!(note.color(), TagColor::None);
        assert!(note.edited_at().is_some());
    }

    #[test]
    fn edit_from_keeps_identity_and_folder() {
        let mut note = Note::from_parts(NoteParts {
            id: 7,
            title: Some("Old".to_string()),
            content: Some("old".to_string()),
            tag: Some("x".to_string()),
            color_code: 1,
            created_at: 1_000,
            edited_at: None,
            folder_id: 3,
        });
        let source = Note::new(Some("New"), Some("new"), Some("y"), TagColor::Blue);

        note.edit_from(&source);

        assert_eq!(note.id(), Some(7));
        assert_eq!(note.created_at(), 1_000);
        assert_eq!(note.folder_id(), 3);
        assert_eq!(note.title(), "New");
        assert_eq!(note.color(), TagColor::Blue);
    }

    #[test]
    fn validate_input_reports_every_coerced_field() {
        let issues = Note::validate_input(Some(""), None, None, -1);
        assert_eq!(
            issues,
            vec![
                NoteInputIssue::MissingTitle,
                NoteInputIssue::MissingContent,
                NoteInputIssue::MissingTag,
                NoteInputIssue::ColorOutOfRange(-1),
            ]
        );
        assert!(Note::validate_input(Some("t"), Some(""), Some(""), 5).is_empty());
    }
}
