//! Course domain model.
//!
//! # Responsibility
//! - Define the persisted `Course` record and the `CourseDraft` input shape.
//! - Enforce name/description length constraints before persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes.
//! - Course names are not required to be unique.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::student::{NAME_MAX_CHARS, NAME_MIN_CHARS};

/// Store-assigned surrogate key for courses.
pub type CourseId = i64;

pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Validation failure for course input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    /// Name is empty or whitespace-only.
    NameRequired,
    /// Name length is outside the 2..=100 character window.
    NameLength(usize),
    /// Description exceeds 1000 characters.
    DescriptionTooLong(usize),
}

impl Display for CourseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "course name is required"),
            Self::NameLength(len) => write!(
                f,
                "course name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters, got {len}"
            ),
            Self::DescriptionTooLong(len) => write!(
                f,
                "course description must not exceed {DESCRIPTION_MAX_CHARS} characters, got {len}"
            ),
        }
    }
}

impl Error for CourseValidationError {}

/// Persisted course record as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned surrogate key.
    pub id: CourseId,
    pub name: String,
    pub description: Option<String>,
}

/// Caller-supplied course fields before an id exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub description: Option<String>,
}

impl CourseDraft {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Checks field format constraints.
    ///
    /// # Errors
    /// - `NameRequired` / `NameLength` when the name is blank or out of range.
    /// - `DescriptionTooLong` when the description exceeds its cap.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CourseValidationError::NameRequired);
        }
        // Surrounding whitespace must not count toward the minimum.
        let name_chars = name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
            return Err(CourseValidationError::NameLength(name_chars));
        }

        if let Some(description) = self.description.as_deref() {
            let description_chars = description.chars().count();
            if description_chars > DESCRIPTION_MAX_CHARS {
                return Err(CourseValidationError::DescriptionTooLong(description_chars));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CourseDraft, CourseValidationError, DESCRIPTION_MAX_CHARS};

    #[test]
    fn validate_accepts_missing_description() {
        let draft = CourseDraft::new("Math101", None);
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let draft = CourseDraft::new("", Some("intro".to_string()));
        assert_eq!(draft.validate(), Err(CourseValidationError::NameRequired));
    }

    #[test]
    fn validate_ignores_padding_when_counting_name_length() {
        let draft = CourseDraft::new(" M ", None);
        assert_eq!(draft.validate(), Err(CourseValidationError::NameLength(1)));
    }

    #[test]
    fn validate_rejects_oversized_description() {
        let long = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        let draft = CourseDraft::new("Math101", Some(long));
        assert_eq!(
            draft.validate(),
            Err(CourseValidationError::DescriptionTooLong(
                DESCRIPTION_MAX_CHARS + 1
            ))
        );
    }
}
