//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service/business orchestration.
//! - Keep check-then-write sequences (email uniqueness, cascade deletion)
//!   inside single transactions.
//!
//! # Invariants
//! - Repository writes must validate drafts before SQL mutations.
//! - Repository APIs return semantic errors (`StudentNotFound`, `EmailTaken`)
//!   in addition to DB transport errors.

use crate::db::DbError;
use crate::model::course::CourseId;
use crate::model::student::StudentId;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod course_repo;
pub mod enrollment_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    StudentNotFound(StudentId),
    CourseNotFound(CourseId),
    /// Another student already holds this email.
    EmailTaken(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::EmailTaken(email) => {
                write!(f, "a student with email `{email}` already exists")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
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

/// Detects the UNIQUE index on `students.email` firing.
///
/// The transactional pre-check normally reports duplicates first; this path
/// only triggers when a concurrent writer wins the race.
pub(crate) fn is_email_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, Some(message)) => {
            code.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("students.email")
        }
        _ => false,
    }
}
