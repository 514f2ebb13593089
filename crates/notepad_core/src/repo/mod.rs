//! Repository layer over the storage gateway.
//!
//! # Responsibility
//! - Define use-case oriented contracts for notes and folders.
//! - Keep SQL and unit-of-work handling behind the [`crate::db::Session`].
//!
//! # Invariants
//! - Lookups by id report absence with `None`/`false`, never with an error.
//! - Errors are reserved for storage failures.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod folder_repo;
pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error. Only raised for storage failures.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Write and read-back disagree within one unit of work.
    InconsistentState(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
