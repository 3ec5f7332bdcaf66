//! Enrollment edge repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own all writes to the `enrollments` join table: one physical edge per
//!   (student, course) pair, single-edge writes only.
//! - Resolve both endpoints inside the same transaction as the edge write.
//!
//! # Invariants
//! - `link`/`unlink` are idempotent: re-linking an existing pair or unlinking
//!   an absent pair is a no-op, not an error.
//! - An edge write never commits against a missing endpoint; the join
//!   table's foreign keys enforce the same rule at the store level.

use crate::model::course::CourseId;
use crate::model::student::StudentId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Repository interface for enrollment edge operations.
pub trait EnrollmentRepository {
    /// Creates the edge. Returns `false` when the pair was already linked.
    ///
    /// # Errors
    /// - `StudentNotFound` / `CourseNotFound` naming the missing endpoint.
    fn link(&mut self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool>;
    /// Removes the edge. Returns `false` when the pair was not linked.
    ///
    /// # Errors
    /// - `StudentNotFound` / `CourseNotFound` naming the missing endpoint.
    fn unlink(&mut self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool>;
    fn is_enrolled(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool>;
    /// Flat snapshot of every edge, ordered by (student, course).
    fn edges(&self) -> RepoResult<Vec<(StudentId, CourseId)>>;
    /// Course ids the student is enrolled in.
    fn course_ids_of(&self, student_id: StudentId) -> RepoResult<Vec<CourseId>>;
    /// Student ids enrolled in the course.
    fn student_ids_of(&self, course_id: CourseId) -> RepoResult<Vec<StudentId>>;
}

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEnrollmentRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn link(&mut self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        resolve_endpoints(&tx, student_id, course_id)?;

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO enrollments (student_id, course_id) VALUES (?1, ?2);",
            params![student_id, course_id],
        )?;
        tx.commit()?;
        Ok(inserted > 0)
    }

    fn unlink(&mut self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        resolve_endpoints(&tx, student_id, course_id)?;

        let removed = tx.execute(
            "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2;",
            params![student_id, course_id],
        )?;
        tx.commit()?;
        Ok(removed > 0)
    }

    fn is_enrolled(&self, student_id: StudentId, course_id: CourseId) -> RepoResult<bool> {
        let enrolled: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2
            );",
            params![student_id, course_id],
            |row| row.get(0),
        )?;
        Ok(enrolled == 1)
    }

    fn edges(&self) -> RepoResult<Vec<(StudentId, CourseId)>> {
        let mut stmt = self.conn.prepare(
            "SELECT student_id, course_id
             FROM enrollments
             ORDER BY student_id ASC, course_id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut edges = Vec::new();
        while let Some(row) = rows.next()? {
            edges.push((row.get(0)?, row.get(1)?));
        }
        Ok(edges)
    }

    fn course_ids_of(&self, student_id: StudentId) -> RepoResult<Vec<CourseId>> {
        let mut stmt = self.conn.prepare(
            "SELECT course_id FROM enrollments WHERE student_id = ?1 ORDER BY course_id ASC;",
        )?;
        let mut rows = stmt.query([student_id])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }

    fn student_ids_of(&self, course_id: CourseId) -> RepoResult<Vec<StudentId>> {
        let mut stmt = self.conn.prepare(
            "SELECT student_id FROM enrollments WHERE course_id = ?1 ORDER BY student_id ASC;",
        )?;
        let mut rows = stmt.query([course_id])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }
}

fn resolve_endpoints(
    tx: &Transaction<'_>,
    student_id: StudentId,
    course_id: CourseId,
) -> RepoResult<()> {
    let student_exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1);",
        [student_id],
        |row| row.get(0),
    )?;
    if student_exists == 0 {
        return Err(RepoError::StudentNotFound(student_id));
    }

    let course_exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?1);",
        [course_id],
        |row| row.get(0),
    )?;
    if course_exists == 0 {
        return Err(RepoError::CourseNotFound(course_id));
    }

    Ok(())
}
