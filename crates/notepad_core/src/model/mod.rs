//! Domain model for notes and folders.
//!
//! # Responsibility
//! - Define the records persisted by the storage gateway.
//! - Keep every field valid by coercion at construction and edit time.
//!
//! # Invariants
//! - No constructor or mutator returns an error for bad field input.
//! - Folder membership is stored once, on the note.

pub mod color;
pub mod folder;
pub mod note;
