//! Two-sided in-memory index over enrollment edges.
//!
//! # Responsibility
//! - Mirror the `enrollments` join table as paired per-student and
//!   per-course views for presentation and consistency checks.
//! - Make the paired `link`/`unlink` mutators the only way to change the
//!   association, so the two views can never diverge.
//!
//! # Invariants
//! - `courses_of(s)` contains `c` iff `students_of(c)` contains `s`, after
//!   any sequence of mutations.
//! - Both sides have set semantics: no duplicates, membership by id.

use crate::model::course::CourseId;
use crate::model::student::StudentId;
use std::collections::{BTreeMap, BTreeSet};

/// Symmetric edge index for the student/course many-to-many relation.
///
/// Both maps are private; callers mutate only through the paired operations
/// below, which always update the two sides together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentIndex {
    by_student: BTreeMap<StudentId, BTreeSet<CourseId>>,
    by_course: BTreeMap<CourseId, BTreeSet<StudentId>>,
}

impl EnrollmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a flat edge list, deduplicating as it goes.
    pub fn from_edges(edges: impl IntoIterator<Item = (StudentId, CourseId)>) -> Self {
        let mut index = Self::new();
        for (student_id, course_id) in edges {
            index.link(student_id, course_id);
        }
        index
    }

    /// Inserts the edge on both sides as one operation.
    ///
    /// Idempotent: returns `false` and leaves both sides unchanged when the
    /// pair is already linked.
    pub fn link(&mut self, student_id: StudentId, course_id: CourseId) -> bool {
        let inserted = self
            .by_student
            .entry(student_id)
            .or_default()
            .insert(course_id);
        self.by_course
            .entry(course_id)
            .or_default()
            .insert(student_id);
        inserted
    }

    /// Removes the edge from both sides as one operation.
    ///
    /// Idempotent: returns `false` when the pair was not linked.
    pub fn unlink(&mut self, student_id: StudentId, course_id: CourseId) -> bool {
        let removed = match self.by_student.get_mut(&student_id) {
            Some(courses) => courses.remove(&course_id),
            None => false,
        };
        if let Some(students) = self.by_course.get_mut(&course_id) {
            students.remove(&student_id);
        }
        removed
    }

    /// Severs every edge touching one student, on both sides.
    ///
    /// Returns the course ids the student was enrolled in.
    pub fn unlink_student(&mut self, student_id: StudentId) -> BTreeSet<CourseId> {
        let courses = self.by_student.remove(&student_id).unwrap_or_default();
        for course_id in &courses {
            if let Some(students) = self.by_course.get_mut(course_id) {
                students.remove(&student_id);
            }
        }
        courses
    }

    /// Severs every edge touching one course, on both sides.
    ///
    /// Returns the student ids that were enrolled in the course.
    pub fn unlink_course(&mut self, course_id: CourseId) -> BTreeSet<StudentId> {
        let students = self.by_course.remove(&course_id).unwrap_or_default();
        for student_id in &students {
            if let Some(courses) = self.by_student.get_mut(student_id) {
                courses.remove(&course_id);
            }
        }
        students
    }

    pub fn contains(&self, student_id: StudentId, course_id: CourseId) -> bool {
        self.by_student
            .get(&student_id)
            .is_some_and(|courses| courses.contains(&course_id))
    }

    /// Course ids the student is enrolled in. Empty for unknown students.
    pub fn courses_of(&self, student_id: StudentId) -> BTreeSet<CourseId> {
        self.by_student.get(&student_id).cloned().unwrap_or_default()
    }

    /// Student ids enrolled in the course. Empty for unknown courses.
    pub fn students_of(&self, course_id: CourseId) -> BTreeSet<StudentId> {
        self.by_course.get(&course_id).cloned().unwrap_or_default()
    }

    /// Total number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.by_student.values().map(BTreeSet::len).sum()
    }

    /// Checks that the two sides mirror each other exactly.
    ///
    /// The mutators make divergence unreachable; this exists for tests and
    /// post-load sanity checks.
    pub fn is_symmetric(&self) -> bool {
        let forward = self.by_student.iter().all(|(student_id, courses)| {
            courses.iter().all(|course_id| {
                self.by_course
                    .get(course_id)
                    .is_some_and(|students| students.contains(student_id))
            })
        });
        let backward = self.by_course.iter().all(|(course_id, students)| {
            students.iter().all(|student_id| {
                self.by_student
                    .get(student_id)
                    .is_some_and(|courses| courses.contains(course_id))
            })
        });
        forward && backward
    }
}

#[cfg(test)]
mod tests {
    use super::EnrollmentIndex;
    use std::collections::BTreeSet;

    #[test]
    fn link_updates_both_sides() {
        let mut index = EnrollmentIndex::new();
        assert!(index.link(1, 10));

        assert!(index.contains(1, 10));
        assert_eq!(index.courses_of(1), BTreeSet::from([10]));
        assert_eq!(index.students_of(10), BTreeSet::from([1]));
        assert!(index.is_symmetric());
    }

    #[test]
    fn link_is_idempotent() {
        let mut index = EnrollmentIndex::new();
        assert!(index.link(1, 10));
        assert!(!index.link(1, 10));
        assert_eq!(index.edge_count(), 1);
    }

    #[test]
    fn unlink_absent_pair_is_noop() {
        let mut index = EnrollmentIndex::new();
        assert!(!index.unlink(1, 10));
        assert_eq!(index.edge_count(), 0);
    }

    #[test]
    fn unlink_student_severs_every_touching_edge() {
        let mut index = EnrollmentIndex::from_edges([(1, 10), (1, 20), (2, 10)]);

        let severed = index.unlink_student(1);
        assert_eq!(severed, BTreeSet::from([10, 20]));
        assert_eq!(index.courses_of(1), BTreeSet::new());
        assert_eq!(index.students_of(10), BTreeSet::from([2]));
        assert_eq!(index.students_of(20), BTreeSet::new());
        assert!(index.is_symmetric());
    }

    #[test]
    fn unlink_course_severs_every_touching_edge() {
        let mut index = EnrollmentIndex::from_edges([(1, 10), (2, 10), (2, 20)]);

        let severed = index.unlink_course(10);
        assert_eq!(severed, BTreeSet::from([1, 2]));
        assert_eq!(index.courses_of(2), BTreeSet::from([20]));
        assert!(index.is_symmetric());
    }

    #[test]
    fn from_edges_deduplicates() {
        let index = EnrollmentIndex::from_edges([(1, 10), (1, 10), (2, 10)]);
        assert_eq!(index.edge_count(), 2);
        assert!(index.is_symmetric());
    }
}
