//! Domain model for students, courses and their enrollment relationship.
//!
//! # Responsibility
//! - Define the persisted record and draft-input shapes for both entities.
//! - Own field validation so invalid input never reaches persistence.
//! - Guarantee the enrollment symmetry invariant through `EnrollmentIndex`.
//!
//! # Invariants
//! - Entity ids are store-assigned and immutable after creation.
//! - A student appears in a course's student set iff the course appears in
//!   the student's course set.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod course;
pub mod enrollment;
pub mod student;

use course::CourseValidationError;
use student::StudentValidationError;

/// Field-level validation failure for either entity.
///
/// Surfaced to callers as `InvalidInput` before any store access happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Student(StudentValidationError),
    Course(CourseValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student(err) => write!(f, "{err}"),
            Self::Course(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Student(err) => Some(err),
            Self::Course(err) => Some(err),
        }
    }
}

impl From<StudentValidationError> for ValidationError {
    fn from(value: StudentValidationError) -> Self {
        Self::Student(value)
    }
}

impl From<CourseValidationError> for ValidationError {
    fn from(value: CourseValidationError) -> Self {
        Self::Course(value)
    }
}
