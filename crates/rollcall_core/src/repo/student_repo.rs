//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and enrollment-partition queries over `students`.
//! - Enforce email uniqueness inside the same transaction as the write.
//! - Cascade edge removal when a student is deleted.
//!
//! # Invariants
//! - `insert_student`/`update_student` never commit a duplicate email; the
//!   UNIQUE index backstops concurrent writers.
//! - `delete_student` removes all touching enrollment edges and the record
//!   in one transaction, so readers never observe dangling edges.

use crate::model::course::CourseId;
use crate::model::student::{Student, StudentDraft, StudentId};
use crate::model::ValidationError;
use crate::repo::{is_email_unique_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, email FROM students";

/// Repository interface for student CRUD and partition queries.
pub trait StudentRepository {
    /// Inserts a validated draft and returns the stored record with its
    /// store-assigned id.
    fn insert_student(&mut self, draft: &StudentDraft) -> RepoResult<Student>;
    /// Rewrites name/email of an existing student. Enrollments are untouched.
    fn update_student(&mut self, id: StudentId, draft: &StudentDraft) -> RepoResult<Student>;
    /// Gets one student by id. Absence is `Ok(None)`, not an error.
    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Gets one student by email, compared case-insensitively.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Student>>;
    fn exists_student(&self, id: StudentId) -> RepoResult<bool>;
    fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    /// Full snapshot of all students.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Deletes the student and every enrollment edge touching it.
    fn delete_student(&mut self, id: StudentId) -> RepoResult<()>;
    /// Students with an edge to the course.
    fn enrolled_in_course(&self, course_id: CourseId) -> RepoResult<Vec<Student>>;
    /// Complement of `enrolled_in_course` over the full student set.
    fn not_enrolled_in_course(&self, course_id: CourseId) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&mut self, draft: &StudentDraft) -> RepoResult<Student> {
        draft.validate().map_err(ValidationError::from)?;
        let email = draft.normalized_email().to_string();

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if email_taken_in_tx(&tx, &email, None)? {
            return Err(RepoError::EmailTaken(email));
        }

        tx.execute(
            "INSERT INTO students (name, email) VALUES (?1, ?2);",
            params![draft.name.as_str(), email.as_str()],
        )
        .map_err(|err| map_unique_violation(err, &email))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Student {
            id,
            name: draft.name.clone(),
            email,
        })
    }

    fn update_student(&mut self, id: StudentId, draft: &StudentDraft) -> RepoResult<Student> {
        draft.validate().map_err(ValidationError::from)?;
        let email = draft.normalized_email().to_string();

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing = find_student_in_tx(&tx, id)?.ok_or(RepoError::StudentNotFound(id))?;

        // An unchanged email never triggers the duplicate check (self-match).
        if !existing.email.eq_ignore_ascii_case(&email) && email_taken_in_tx(&tx, &email, Some(id))?
        {
            return Err(RepoError::EmailTaken(email));
        }

        tx.execute(
            "UPDATE students SET name = ?1, email = ?2 WHERE id = ?3;",
            params![draft.name.as_str(), email.as_str(), id],
        )
        .map_err(|err| map_unique_violation(err, &email))?;
        tx.commit()?;

        Ok(Student {
            id,
            name: draft.name.clone(),
            email,
        })
    }

    fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE email = ?1;"))?;
        let mut rows = stmt.query([email.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }
        Ok(None)
    }

    fn exists_student(&self, id: StudentId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = ?1);",
            [email.trim()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query([])?;
        collect_students(rows)
    }

    fn delete_student(&mut self, id: StudentId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_student_in_tx(&tx, id)?.is_none() {
            return Err(RepoError::StudentNotFound(id));
        }

        // Edges first: the student row must never outlive its edges inside
        // this transaction, or FK checks would reject the delete.
        tx.execute("DELETE FROM enrollments WHERE student_id = ?1;", [id])?;
        tx.execute("DELETE FROM students WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(())
    }

    fn enrolled_in_course(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.id, s.name, s.email
             FROM students s
             INNER JOIN enrollments e ON e.student_id = s.id
             WHERE e.course_id = ?1
             ORDER BY s.id ASC;",
        )?;
        let rows = stmt.query([course_id])?;
        collect_students(rows)
    }

    fn not_enrolled_in_course(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL}
             WHERE id NOT IN (
                SELECT student_id FROM enrollments WHERE course_id = ?1
             )
             ORDER BY id ASC;"
        ))?;
        let rows = stmt.query([course_id])?;
        collect_students(rows)
    }
}

fn map_unique_violation(err: rusqlite::Error, email: &str) -> RepoError {
    if is_email_unique_violation(&err) {
        RepoError::EmailTaken(email.to_string())
    } else {
        err.into()
    }
}

fn email_taken_in_tx(
    tx: &Transaction<'_>,
    email: &str,
    exclude: Option<StudentId>,
) -> RepoResult<bool> {
    let taken: i64 = match exclude {
        Some(id) => tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = ?1 AND id <> ?2);",
            params![email, id],
            |row| row.get(0),
        )?,
        None => tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = ?1);",
            [email],
            |row| row.get(0),
        )?,
    };
    Ok(taken == 1)
}

fn find_student_in_tx(tx: &Transaction<'_>, id: StudentId) -> RepoResult<Option<Student>> {
    let mut stmt = tx.prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_student_row(row)?));
    }
    Ok(None)
}

fn collect_students(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Student>> {
    let mut students = Vec::new();
    while let Some(row) = rows.next()? {
        students.push(parse_student_row(row)?);
    }
    Ok(students)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id: StudentId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive id `{id}` in students.id"
        )));
    }
    Ok(Student {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}
