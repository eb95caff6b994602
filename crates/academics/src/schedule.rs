use serde::{Deserialize, Serialize};

use colegio_core::{CourseSlug, Dni};

use crate::types::{Section, Shift};

/// One teacher's timetable block: the (shift, grade, section) slot and the
/// set of courses taught in it. Schedules are the join point between
/// teachers, courses, and (through enrollments) students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Dni,
    pub shift: Shift,
    pub grade: u8,
    pub section: Section,
    pub courses: Vec<CourseSlug>,
}
