//! Course use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for courses.
//! - Expose the enrolled/not-enrolled partition pair for a student.
//!
//! # Invariants
//! - Course names carry no uniqueness rule.
//! - `courses_enrolled_by` and `courses_not_enrolled_by` always form a
//!   disjoint, complete split of the full course list.

use crate::model::course::{Course, CourseDraft, CourseId};
use crate::model::student::StudentId;
use crate::model::ValidationError;
use crate::repo::course_repo::CourseRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for course use-cases.
#[derive(Debug)]
pub enum CourseServiceError {
    /// Name or description fails format constraints.
    InvalidInput(ValidationError),
    /// Target course does not exist.
    NotFound(CourseId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CourseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "course not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CourseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for CourseServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            RepoError::CourseNotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Course service facade over repository implementations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a course and returns the record with its assigned id.
    pub fn create_course(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Course, CourseServiceError> {
        let draft = CourseDraft::new(name, description);
        Ok(self.repo.insert_course(&draft)?)
    }

    /// Rewrites name/description of an existing course. Enrollments are
    /// untouched.
    pub fn update_course(
        &mut self,
        id: CourseId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Course, CourseServiceError> {
        let draft = CourseDraft::new(name, description);
        Ok(self.repo.update_course(id, &draft)?)
    }

    /// Gets one course by id. Absence is `Ok(None)`, never an error.
    pub fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        self.repo.find_course(id)
    }

    /// Full snapshot of all courses.
    pub fn list_courses(&self) -> RepoResult<Vec<Course>> {
        self.repo.list_courses()
    }

    /// Deletes the course after severing every enrollment edge touching it.
    ///
    /// # Errors
    /// - `NotFound` when the id does not exist.
    pub fn delete_course(&mut self, id: CourseId) -> Result<(), CourseServiceError> {
        Ok(self.repo.delete_course(id)?)
    }

    /// Courses the student is enrolled in. Empty for unknown student ids.
    pub fn courses_enrolled_by(&self, student_id: StudentId) -> RepoResult<Vec<Course>> {
        self.repo.enrolled_by_student(student_id)
    }

    /// Courses the student is not enrolled in; the full list for unknown ids.
    pub fn courses_not_enrolled_by(&self, student_id: StudentId) -> RepoResult<Vec<Course>> {
        self.repo.not_enrolled_by_student(student_id)
    }

    pub fn course_exists(&self, id: CourseId) -> RepoResult<bool> {
        self.repo.exists_course(id)
    }
}
