//! Dashboard summary: role-scoped headline counts and quick insights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use colegio_core::{Dni, RecordId};

use crate::course::Course;
use crate::enrollment::Enrollment;
use crate::schedule::Schedule;
use crate::student::Student;
use crate::teacher::Teacher;
use crate::visibility::{Viewer, visible_students};

/// A teacher and how many schedule blocks they carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherLoad {
    pub dni: Dni,
    pub name: String,
    #[serde(rename = "scheduleCount")]
    pub schedule_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Active students, restricted to the viewer's visible set for teachers.
    #[serde(rename = "activeStudents")]
    pub active_students: usize,
    #[serde(rename = "activeTeachers")]
    pub active_teachers: usize,
    #[serde(rename = "activeCourses")]
    pub active_courses: usize,
    #[serde(rename = "totalEnrollments")]
    pub total_enrollments: usize,
    /// Teacher with the most schedules. Ties break on ascending DNI so the
    /// answer is deterministic.
    #[serde(rename = "busiestTeacher")]
    pub busiest_teacher: Option<TeacherLoad>,
    /// Names of courses no schedule includes.
    #[serde(rename = "unassignedCourses")]
    pub unassigned_courses: Vec<String>,
    /// Schedule count per shift literal.
    #[serde(rename = "schedulesByShift")]
    pub schedules_by_shift: BTreeMap<String, usize>,
}

pub fn dashboard_stats(
    viewer: &Viewer,
    students: &[Student],
    teachers: &[Teacher],
    courses: &[Course],
    schedules: &[(RecordId, Schedule)],
    enrollments: &[Enrollment],
) -> DashboardStats {
    let visible = visible_students(
        viewer,
        students,
        schedules.iter().map(|(id, s)| (*id, s)),
        enrollments,
    );
    let active_students = students
        .iter()
        .filter(|s| s.status.is_active() && visible.contains(&s.dni))
        .count();

    let active_teachers = teachers.iter().filter(|t| t.status.is_active()).count();
    let active_courses = courses.iter().filter(|c| c.status.is_active()).count();

    let mut loads: Vec<TeacherLoad> = teachers
        .iter()
        .map(|t| TeacherLoad {
            dni: t.dni.clone(),
            name: format!("{} {}", t.name, t.lastname),
            schedule_count: schedules
                .iter()
                .filter(|(_, s)| s.teacher_dni == t.dni)
                .count(),
        })
        .filter(|l| l.schedule_count > 0)
        .collect();
    loads.sort_by(|a, b| {
        b.schedule_count
            .cmp(&a.schedule_count)
            .then_with(|| a.dni.cmp(&b.dni))
    });
    let busiest_teacher = loads.into_iter().next();

    let unassigned_courses = courses
        .iter()
        .filter(|c| !schedules.iter().any(|(_, s)| s.courses.contains(&c.slug)))
        .map(|c| c.name.clone())
        .collect();

    let mut schedules_by_shift = BTreeMap::new();
    for (_, s) in schedules {
        *schedules_by_shift.entry(s.shift.to_string()).or_insert(0) += 1;
    }

    DashboardStats {
        active_students,
        active_teachers,
        active_courses,
        total_enrollments: enrollments.len(),
        busiest_teacher,
        unassigned_courses,
        schedules_by_shift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use colegio_core::CourseSlug;

    use crate::teacher::{GradeAssignment, StaffRole, TeacherSection};
    use crate::types::{EntityStatus, Level, Section, Sex, Shift, Specialty};

    fn teacher(dni: &str, name: &str) -> Teacher {
        Teacher {
            dni: dni.into(),
            name: name.to_string(),
            lastname: "Perez".to_string(),
            email: format!("{}@ieprimaria.com", name.to_lowercase()),
            sex: Sex::F,
            birthdate: NaiveDate::from_ymd_opt(1985, 7, 1).unwrap(),
            specialty: Specialty::PrimariaGeneral,
            grade: GradeAssignment::All,
            section: TeacherSection::Rotativo,
            role: StaffRole::Docente,
            status: EntityStatus::Activo,
        }
    }

    fn student(dni: &str, status: EntityStatus) -> Student {
        Student {
            dni: dni.into(),
            name: "Luis".to_string(),
            lastname: "Gomez".to_string(),
            email: "apoderado@example.com".to_string(),
            sex: Sex::M,
            birthdate: NaiveDate::from_ymd_opt(2015, 1, 20).unwrap(),
            age: 10,
            level: Level::Primaria,
            grade: 4,
            section: Section::B,
            shift: Shift::Manana,
            status,
        }
    }

    fn schedule(teacher: &str) -> (RecordId, Schedule) {
        (
            RecordId::new(),
            Schedule {
                teacher_dni: teacher.into(),
                shift: Shift::Manana,
                grade: 4,
                section: Section::B,
                courses: vec![CourseSlug::new("matematica")],
            },
        )
    }

    #[test]
    fn busiest_teacher_ties_break_on_ascending_dni() {
        let teachers = [teacher("50607080", "Rosa"), teacher("40302010", "Maria")];
        let schedules = vec![
            schedule("50607080"),
            schedule("40302010"),
            schedule("40302010"),
            schedule("50607080"),
        ];

        let stats = dashboard_stats(&Viewer::Admin, &[], &teachers, &[], &schedules, &[]);
        let busiest = stats.busiest_teacher.unwrap();
        assert_eq!(busiest.schedule_count, 2);
        assert_eq!(busiest.dni, Dni::from("40302010"));
    }

    #[test]
    fn counts_are_role_scoped_for_teachers() {
        let students = [
            student("11111111", EntityStatus::Activo),
            student("22222222", EntityStatus::Activo),
            student("33333333", EntityStatus::Inactivo),
        ];
        let teachers = [teacher("40302010", "Maria")];
        let schedules = vec![schedule("40302010")];
        let enrollments = [
            Enrollment {
                schedule_id: schedules[0].0,
                student_dni: "11111111".into(),
            },
            Enrollment {
                schedule_id: schedules[0].0,
                student_dni: "33333333".into(),
            },
        ];

        let admin = dashboard_stats(&Viewer::Admin, &students, &teachers, &[], &schedules, &enrollments);
        assert_eq!(admin.active_students, 2);

        let own = dashboard_stats(
            &Viewer::Teacher("40302010".into()),
            &students,
            &teachers,
            &[],
            &schedules,
            &enrollments,
        );
        // Enrolled actives only; the inactive enrollee does not count.
        assert_eq!(own.active_students, 1);
        assert_eq!(own.total_enrollments, 2);
    }

    #[test]
    fn flags_unassigned_courses_and_shift_spread() {
        let courses = [
            Course {
                slug: CourseSlug::new("matematica"),
                name: "Matematica".to_string(),
                teacher_dni: "40302010".into(),
                status: EntityStatus::Activo,
            },
            Course {
                slug: CourseSlug::new("ajedrez"),
                name: "Ajedrez".to_string(),
                teacher_dni: "40302010".into(),
                status: EntityStatus::Activo,
            },
        ];
        let schedules = vec![schedule("40302010")];

        let stats = dashboard_stats(&Viewer::Admin, &[], &[], &courses, &schedules, &[]);
        assert_eq!(stats.unassigned_courses, vec!["Ajedrez".to_string()]);
        assert_eq!(stats.schedules_by_shift.get("MANANA"), Some(&1));
    }
}
