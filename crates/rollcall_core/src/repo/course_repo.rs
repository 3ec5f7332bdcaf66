//! Course repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and enrollment-partition queries over `courses`.
//! - Cascade edge removal when a course is deleted.
//!
//! # Invariants
//! - `delete_course` removes all touching enrollment edges and the record in
//!   one transaction.
//! - Course names are not unique; no uniqueness checks run here.

use crate::model::course::{Course, CourseDraft, CourseId};
use crate::model::student::StudentId;
use crate::model::ValidationError;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const COURSE_SELECT_SQL: &str = "SELECT id, name, description FROM courses";

/// Repository interface for course CRUD and partition queries.
pub trait CourseRepository {
    /// Inserts a validated draft and returns the stored record with its
    /// store-assigned id.
    fn insert_course(&mut self, draft: &CourseDraft) -> RepoResult<Course>;
    /// Rewrites name/description of an existing course. Enrollments are
    /// untouched.
    fn update_course(&mut self, id: CourseId, draft: &CourseDraft) -> RepoResult<Course>;
    /// Gets one course by id. Absence is `Ok(None)`, not an error.
    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>>;
    fn exists_course(&self, id: CourseId) -> RepoResult<bool>;
    /// Full snapshot of all courses.
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
    /// Deletes the course and every enrollment edge touching it.
    fn delete_course(&mut self, id: CourseId) -> RepoResult<()>;
    /// Courses with an edge to the student.
    fn enrolled_by_student(&self, student_id: StudentId) -> RepoResult<Vec<Course>>;
    /// Complement of `enrolled_by_student` over the full course set.
    fn not_enrolled_by_student(&self, student_id: StudentId) -> RepoResult<Vec<Course>>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn insert_course(&mut self, draft: &CourseDraft) -> RepoResult<Course> {
        draft.validate().map_err(ValidationError::from)?;

        self.conn.execute(
            "INSERT INTO courses (name, description) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.description.as_deref()],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(Course {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
        })
    }

    fn update_course(&mut self, id: CourseId, draft: &CourseDraft) -> RepoResult<Course> {
        draft.validate().map_err(ValidationError::from)?;

        let changed = self.conn.execute(
            "UPDATE courses SET name = ?1, description = ?2 WHERE id = ?3;",
            params![draft.name.as_str(), draft.description.as_deref(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::CourseNotFound(id));
        }

        Ok(Course {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
        })
    }

    fn find_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }
        Ok(None)
    }

    fn exists_course(&self, id: CourseId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query([])?;
        collect_courses(rows)
    }

    fn delete_course(&mut self, id: CourseId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !course_exists_in_tx(&tx, id)? {
            return Err(RepoError::CourseNotFound(id));
        }

        tx.execute("DELETE FROM enrollments WHERE course_id = ?1;", [id])?;
        tx.execute("DELETE FROM courses WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(())
    }

    fn enrolled_by_student(&self, student_id: StudentId) -> RepoResult<Vec<Course>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, c.description
             FROM courses c
             INNER JOIN enrollments e ON e.course_id = c.id
             WHERE e.student_id = ?1
             ORDER BY c.id ASC;",
        )?;
        let rows = stmt.query([student_id])?;
        collect_courses(rows)
    }

    fn not_enrolled_by_student(&self, student_id: StudentId) -> RepoResult<Vec<Course>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COURSE_SELECT_SQL}
             WHERE id NOT IN (
                SELECT course_id FROM enrollments WHERE student_id = ?1
             )
             ORDER BY id ASC;"
        ))?;
        let rows = stmt.query([student_id])?;
        collect_courses(rows)
    }
}

fn course_exists_in_tx(tx: &Transaction<'_>, id: CourseId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn collect_courses(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Course>> {
    let mut courses = Vec::new();
    while let Some(row) = rows.next()? {
        courses.push(parse_course_row(row)?);
    }
    Ok(courses)
}

fn parse_course_row(row: &Row<'_>) -> RepoResult<Course> {
    let id: CourseId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive id `{id}` in courses.id"
        )));
    }
    Ok(Course {
        id,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
