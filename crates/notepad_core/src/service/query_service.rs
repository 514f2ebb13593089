//! Note search and sort use-cases.
//!
//! # Responsibility
//! - Filter the full note set by title, tag or content.
//! - Merge the three filters into one deduplicated result.
//! - Provide pure sort helpers for presenting any note sequence.
//!
//! # Invariants
//! - Matching is case-insensitive; title/content use containment, tag uses
//!   exact equality.
//! - Combined results keep first occurrence order: title hits, then tag
//!   hits, then content hits.
//! - Sorts are stable.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoResult;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Stateless query facade over a note repository.
pub struct QueryService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> QueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Notes whose title contains `needle`, ignoring case.
    pub fn by_title(&self, needle: &str) -> RepoResult<Vec<Note>> {
        Ok(filter_by_title(self.repo.get_all()?, needle))
    }

    /// Notes whose tag equals `tag`, ignoring case.
    pub fn by_tag(&self, tag: &str) -> RepoResult<Vec<Note>> {
        Ok(filter_by_tag(self.repo.get_all()?, tag))
    }

    /// Notes whose content contains `needle`, ignoring case.
    pub fn by_snippet(&self, needle: &str) -> RepoResult<Vec<Note>> {
        Ok(filter_by_snippet(self.repo.get_all()?, needle))
    }

    /// Union of [`by_title`](Self::by_title), [`by_tag`](Self::by_tag) and
    /// [`by_snippet`](Self::by_snippet) for one input, without duplicates.
    pub fn combined_by_input(&self, input: &str) -> RepoResult<Vec<Note>> {
        let notes = self.repo.get_all()?;
        let by_title = filter_by_title(notes.clone(), input);
        let by_tag = filter_by_tag(notes.clone(), input);
        let by_snippet = filter_by_snippet(notes, input);

        let mut seen: HashSet<Option<NoteId>> = HashSet::new();
        Ok(by_title
            .into_iter()
            .chain(by_tag)
            .chain(by_snippet)
            .filter(|note| seen.insert(note.id()))
            .collect())
    }
}

/// Sorts by title, A to Z.
pub fn sorted_alphabetically(notes: Vec<Note>) -> Vec<Note> {
    sorted_by(notes, compare_titles)
}

/// Sorts by title, Z to A.
pub fn sorted_alphabetically_desc(notes: Vec<Note>) -> Vec<Note> {
    sorted_by(notes, |a, b| compare_titles(b, a))
}

/// Sorts by creation time, oldest first.
pub fn sorted_by_date_of_creation(notes: Vec<Note>) -> Vec<Note> {
    sorted_by(notes, |a, b| a.created_at().cmp(&b.created_at()))
}

/// Sorts by creation time, newest first.
pub fn sorted_by_date_of_creation_desc(notes: Vec<Note>) -> Vec<Note> {
    sorted_by(notes, |a, b| b.created_at().cmp(&a.created_at()))
}

fn sorted_by(mut notes: Vec<Note>, compare: impl FnMut(&Note, &Note) -> Ordering) -> Vec<Note> {
    notes.sort_by(compare);
    notes
}

// Case-folded first so "apple" sorts before "Banana"; raw text breaks ties.
fn compare_titles(a: &Note, b: &Note) -> Ordering {
    a.title()
        .to_lowercase()
        .cmp(&b.title().to_lowercase())
        .then_with(|| a.title().cmp(b.title()))
}

fn filter_by_title(notes: Vec<Note>, needle: &str) -> Vec<Note> {
    let needle = needle.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.title().to_lowercase().contains(&needle))
        .collect()
}

fn filter_by_tag(notes: Vec<Note>, tag: &str) -> Vec<Note> {
    let tag = tag.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.tag().to_lowercase() == tag)
        .collect()
}

fn filter_by_snippet(notes: Vec<Note>, needle: &str) -> Vec<Note> {
    let needle = needle.to_lowercase();
    notes
        .into_iter()
        .filter(|note| note.content().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        sorted_alphabetically, sorted_alphabetically_desc, sorted_by_date_of_creation,
        sorted_by_date_of_creation_desc,
    };
    use crate::model::note::{Note, NoteParts};

    fn note(id: i64, title: &str, created_at: i64) -> Note {
        Note::from_parts(NoteParts {
            id,
            title: Some(title.to_string()),
            content: Some(String::new()),
            tag: Some(String::new()),
            color_code: 0,
            created_at,
            edited_at: None,
            folder_id: 1,
        })
    }

    fn ids(notes: &[Note]) -> Vec<i64> {
        notes.iter().filter_map(Note::id).collect()
    }

    #[test]
    fn alphabetical_sort_ignores_case_and_is_stable() {
        let notes = vec![
            note(1, "banana", 10),
            note(2, "Apple", 20),
            note(3, "cherry", 30),
            note(4, "banana", 40),
        ];
        assert_eq!(ids(&sorted_alphabetically(notes.clone())), vec![2, 1, 4, 3]);
        assert_eq!(ids(&sorted_alphabetically_desc(notes)), vec![3, 1, 4, 2]);
    }

    #[test]
    fn creation_sort_orders_by_timestamp_and_keeps_ties() {
        let notes = vec![
            note(1, "a", 300),
            note(2, "b", 100),
            note(3, "c", 200),
            note(4, "d", 100),
        ];
        assert_eq!(
            ids(&sorted_by_date_of_creation(notes.clone())),
            vec![2, 4, 3, 1]
        );
        assert_eq!(
            ids(&sorted_by_date_of_creation_desc(notes)),
            vec![1, 3, 2, 4]
        );
    }

    #[test]
    fn sorting_empty_input_is_empty() {
        assert!(sorted_alphabetically(Vec::new()).is_empty());
        assert!(sorted_by_date_of_creation_desc(Vec::new()).is_empty());
    }
}
