//! Enrollment orchestration service.
//!
//! # Responsibility
//! - Resolve both endpoints and drive the paired edge write for
//!   enroll/unenroll.
//! - Expose a symmetric read model (`EnrollmentIndex`) for presentation.
//!
//! # Invariants
//! - Enrolling an already-enrolled pair and unenrolling a never-enrolled
//!   pair succeed silently.
//! - A failed resolution names whichever endpoint is missing.

use crate::model::course::CourseId;
use crate::model::enrollment::EnrollmentIndex;
use crate::model::student::StudentId;
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for enrollment use-cases.
#[derive(Debug)]
pub enum EnrollmentServiceError {
    /// The student endpoint does not exist.
    StudentNotFound(StudentId),
    /// The course endpoint does not exist.
    CourseNotFound(CourseId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for EnrollmentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EnrollmentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EnrollmentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::StudentNotFound(id) => Self::StudentNotFound(id),
            RepoError::CourseNotFound(id) => Self::CourseNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Enrollment service facade over repository implementations.
pub struct EnrollmentService<R: EnrollmentRepository> {
    repo: R,
}

impl<R: EnrollmentRepository> EnrollmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Enrolls the student in the course.
    ///
    /// Returns `true` when a new edge was created, `false` when the pair was
    /// already enrolled (silent no-op).
    ///
    /// # Errors
    /// - `StudentNotFound` / `CourseNotFound` naming the missing endpoint.
    pub fn enroll(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<bool, EnrollmentServiceError> {
        Ok(self.repo.link(student_id, course_id)?)
    }

    /// Removes the student's enrollment in the course.
    ///
    /// Returns `true` when an edge was removed, `false` when the pair was
    /// not enrolled (silent no-op).
    ///
    /// # Errors
    /// - `StudentNotFound` / `CourseNotFound` naming the missing endpoint.
    pub fn unenroll(
        &mut self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<bool, EnrollmentServiceError> {
        Ok(self.repo.unlink(student_id, course_id)?)
    }

    pub fn is_enrolled(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool> {
        self.repo.is_enrolled(student_id, course_id)
    }

    /// Builds the two-sided in-memory view of every enrollment edge, as of
    /// one consistent read of the store.
    pub fn snapshot(&self) -> RepoResult<EnrollmentIndex> {
        let edges = self.repo.edges()?;
        Ok(EnrollmentIndex::from_edges(edges))
    }
}
