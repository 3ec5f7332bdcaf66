//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate repository errors into per-service error kinds the
//!   presentation layer can map to user-facing messages.
//!
//! # Invariants
//! - "Not found" on reads is `Ok(None)`; only mutations of a missing entity
//!   produce a `NotFound` error.

pub mod course_service;
pub mod enrollment_service;
pub mod student_service;
