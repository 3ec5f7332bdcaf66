//! Student use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for students.
//! - Expose the enrolled/not-enrolled partition pair for a course.
//!
//! # Invariants
//! - Email uniqueness failures surface as `DuplicateEmail`, never as raw
//!   store errors; an unchanged email on update is always allowed.
//! - `students_enrolled_in` and `students_not_enrolled_in` always form a
//!   disjoint, complete split of the full student list.

use crate::model::course::CourseId;
use crate::model::student::{Student, StudentDraft, StudentId};
use crate::model::ValidationError;
use crate::repo::student_repo::StudentRepository;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for student use-cases.
#[derive(Debug)]
pub enum StudentServiceError {
    /// Name or email fails format constraints; no store access happened.
    InvalidInput(ValidationError),
    /// Another student already holds this email.
    DuplicateEmail(String),
    /// Target student does not exist.
    NotFound(StudentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => {
                write!(f, "a student with email `{email}` already exists")
            }
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StudentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StudentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            RepoError::EmailTaken(email) => Self::DuplicateEmail(email),
            RepoError::StudentNotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Student service facade over repository implementations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a student and returns the record with its assigned id.
    ///
    /// # Errors
    /// - `InvalidInput` when name or email fail format constraints.
    /// - `DuplicateEmail` when the email is already held by any student.
    pub fn create_student(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Student, StudentServiceError> {
        let draft = StudentDraft::new(name, email);
        Ok(self.repo.insert_student(&draft)?)
    }

    /// Rewrites name/email of an existing student.
    ///
    /// Course associations are untouched. Setting the email to its current
    /// value succeeds; changing it to one held by a different student fails
    /// with `DuplicateEmail`.
    pub fn update_student(
        &mut self,
        id: StudentId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Student, StudentServiceError> {
        let draft = StudentDraft::new(name, email);
        Ok(self.repo.update_student(id, &draft)?)
    }

    /// Gets one student by id. Absence is `Ok(None)`, never an error;
    /// treating it as fatal is the caller's decision.
    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.find_student(id)
    }

    /// Full snapshot of all students.
    pub fn list_students(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_students()
    }

    /// Deletes the student after severing every enrollment edge touching it.
    ///
    /// # Errors
    /// - `NotFound` when the id does not exist.
    pub fn delete_student(&mut self, id: StudentId) -> Result<(), StudentServiceError> {
        Ok(self.repo.delete_student(id)?)
    }

    /// Students enrolled in the course. Empty for unknown course ids.
    pub fn students_enrolled_in(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        self.repo.enrolled_in_course(course_id)
    }

    /// Students not enrolled in the course; the full list for unknown ids.
    pub fn students_not_enrolled_in(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        self.repo.not_enrolled_in_course(course_id)
    }

    pub fn student_exists(&self, id: StudentId) -> RepoResult<bool> {
        self.repo.exists_student(id)
    }
}
