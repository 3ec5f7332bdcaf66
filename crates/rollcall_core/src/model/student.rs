//! Student domain model.
//!
//! # Responsibility
//! - Define the persisted `Student` record and the `StudentDraft` input shape.
//! - Enforce name/email format constraints before persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes.
//! - Email uniqueness is a store-level rule, not a field-level one; this
//!   module only checks syntax.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key for students.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = i64;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").expect("valid email regex")
});

/// Validation failure for student input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Name is empty or whitespace-only.
    NameRequired,
    /// Name length is outside the 2..=100 character window.
    NameLength(usize),
    /// Email is empty or whitespace-only.
    EmailRequired,
    /// Email does not parse as an address.
    EmailSyntax(String),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "student name is required"),
            Self::NameLength(len) => write!(
                f,
                "student name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters, got {len}"
            ),
            Self::EmailRequired => write!(f, "student email is required"),
            Self::EmailSyntax(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for StudentValidationError {}

/// Persisted student record as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned surrogate key.
    pub id: StudentId,
    pub name: String,
    /// Unique across all students, compared case-insensitively.
    pub email: String,
}

/// Caller-supplied student fields before an id exists.
///
/// Used for both create and update; the id travels separately so it can
/// never be rewritten through this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Checks field format constraints.
    ///
    /// # Errors
    /// - `NameRequired` / `NameLength` when the name is blank or out of range.
    /// - `EmailRequired` / `EmailSyntax` when the email is blank or malformed.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StudentValidationError::NameRequired);
        }
        // Surrounding whitespace must not count toward the minimum.
        let name_chars = name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
            return Err(StudentValidationError::NameLength(name_chars));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(StudentValidationError::EmailRequired);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(StudentValidationError::EmailSyntax(email.to_string()));
        }

        Ok(())
    }

    /// Email with surrounding whitespace removed, as persisted.
    pub fn normalized_email(&self) -> &str {
        self.email.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::{StudentDraft, StudentValidationError};

    #[test]
    fn validate_accepts_plain_address() {
        let draft = StudentDraft::new("Alice", "a@x.com");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let draft = StudentDraft::new("   ", "a@x.com");
        assert_eq!(draft.validate(), Err(StudentValidationError::NameRequired));
    }

    #[test]
    fn validate_rejects_single_char_name() {
        let draft = StudentDraft::new("A", "a@x.com");
        assert_eq!(draft.validate(), Err(StudentValidationError::NameLength(1)));
    }

    #[test]
    fn validate_ignores_padding_when_counting_name_length() {
        let draft = StudentDraft::new("A ", "a@x.com");
        assert_eq!(draft.validate(), Err(StudentValidationError::NameLength(1)));

        let draft = StudentDraft::new("  Al  ", "a@x.com");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_at_sign() {
        let draft = StudentDraft::new("Alice", "a.x.com");
        assert_eq!(
            draft.validate(),
            Err(StudentValidationError::EmailSyntax("a.x.com".to_string()))
        );
    }

    #[test]
    fn normalized_email_trims_whitespace() {
        let draft = StudentDraft::new("Alice", "  a@x.com ");
        assert_eq!(draft.normalized_email(), "a@x.com");
        assert_eq!(draft.validate(), Ok(()));
    }
}
