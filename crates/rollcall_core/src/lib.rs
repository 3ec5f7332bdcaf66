//! Core domain logic for Rollcall: students, courses and the enrollment
//! relationship between them.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, CourseDraft, CourseId, CourseValidationError};
pub use model::enrollment::EnrollmentIndex;
pub use model::student::{Student, StudentDraft, StudentId, StudentValidationError};
pub use model::ValidationError;
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::course_service::{CourseService, CourseServiceError};
pub use service::enrollment_service::{EnrollmentService, EnrollmentServiceError};
pub use service::student_service::{StudentService, StudentServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
