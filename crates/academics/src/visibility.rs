//! Role-scoped visibility joins.
//!
//! Which students and courses a session may see is derived, not stored:
//! a teacher reaches students only through enrollments in their own
//! schedules, and courses only through those schedules' course sets.

use std::collections::HashSet;

use colegio_core::{CourseSlug, Dni, RecordId};

use crate::{Enrollment, Schedule, Student};

/// Who is looking. Admins see everything; teachers see their own slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Admin,
    Teacher(Dni),
}

impl Viewer {
    pub fn teacher_dni(&self) -> Option<&Dni> {
        match self {
            Viewer::Admin => None,
            Viewer::Teacher(dni) => Some(dni),
        }
    }
}

/// The set of courses a viewer may read grades for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseScope {
    All,
    Only(HashSet<CourseSlug>),
}

impl CourseScope {
    pub fn allows(&self, slug: &CourseSlug) -> bool {
        match self {
            CourseScope::All => true,
            CourseScope::Only(set) => set.contains(slug),
        }
    }
}

/// Student DNIs visible to the viewer.
///
/// Admin: every student. Teacher: students enrolled in any schedule whose
/// `teacherDni` matches. A teacher with no schedules gets the empty set,
/// not an error.
pub fn visible_students<'a>(
    viewer: &Viewer,
    students: impl IntoIterator<Item = &'a Student>,
    schedules: impl IntoIterator<Item = (RecordId, &'a Schedule)>,
    enrollments: impl IntoIterator<Item = &'a Enrollment>,
) -> HashSet<Dni> {
    match viewer {
        Viewer::Admin => students.into_iter().map(|s| s.dni.clone()).collect(),
        Viewer::Teacher(dni) => {
            let own_schedules: HashSet<RecordId> = schedules
                .into_iter()
                .filter(|(_, s)| &s.teacher_dni == dni)
                .map(|(id, _)| id)
                .collect();
            enrollments
                .into_iter()
                .filter(|e| own_schedules.contains(&e.schedule_id))
                .map(|e| e.student_dni.clone())
                .collect()
        }
    }
}

/// Courses visible to the viewer: the union of course slugs across the
/// teacher's own schedules; unrestricted for admins.
pub fn visible_courses<'a>(
    viewer: &Viewer,
    schedules: impl IntoIterator<Item = &'a Schedule>,
) -> CourseScope {
    match viewer {
        Viewer::Admin => CourseScope::All,
        Viewer::Teacher(dni) => CourseScope::Only(
            schedules
                .into_iter()
                .filter(|s| &s.teacher_dni == dni)
                .flat_map(|s| s.courses.iter().cloned())
                .collect(),
        ),
    }
}
