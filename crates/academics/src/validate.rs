//! Form-level validation, computed before any mutation and blocking it.
//!
//! Messages keep the wording the administration staff already knows.
//! Enum-typed fields (section, shift, specialty, status) are constrained by
//! construction; only the cross-field and range rules remain to check.

use std::collections::BTreeMap;

use colegio_core::Dni;

use crate::grade::{EVALUATIONS_PER_TERM, GradeEntry, MAX_SCORE};
use crate::student::Student;
use crate::teacher::{GradeAssignment, Teacher};
use crate::types::{Section, Shift};

/// Field name → message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.insert(field.to_string(), message.to_string());
}

pub fn validate_student(student: &Student) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !Dni::is_well_formed(student.dni.as_str()) {
        push(&mut errors, "dni", "El DNI debe tener 8 digitos.");
    }
    if student.name.trim().is_empty() {
        push(&mut errors, "name", "El nombre es obligatorio.");
    }
    if student.lastname.trim().is_empty() {
        push(&mut errors, "lastname", "El apellido es obligatorio.");
    }
    if !student.email.contains('@') {
        push(&mut errors, "email", "Correo invalido.");
    }
    if !(5..=12).contains(&student.age) {
        push(&mut errors, "age", "La edad debe ser entre 5 y 12 anos.");
    }
    if !(1..=6).contains(&student.grade) {
        push(&mut errors, "grade", "El grado debe estar entre 1 y 6.");
    }

    match student.shift {
        Shift::Manana => {
            if !matches!(student.section, Section::A | Section::B) {
                push(
                    &mut errors,
                    "section",
                    "Las secciones A y B solo son validas para el turno MANANA.",
                );
            }
        }
        Shift::Tarde => {
            if !matches!(student.section, Section::C | Section::D) {
                push(
                    &mut errors,
                    "section",
                    "Las secciones C y D solo son validas para el turno TARDE.",
                );
            }
        }
        Shift::Noche => {
            push(&mut errors, "shift", "El turno es obligatorio.");
        }
    }

    errors
}

pub fn validate_teacher(teacher: &Teacher) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !Dni::is_well_formed(teacher.dni.as_str()) {
        push(&mut errors, "dni", "DNI invalido");
    }
    if teacher.name.trim().is_empty() {
        push(&mut errors, "name", "Nombre obligatorio");
    }
    if teacher.lastname.trim().is_empty() {
        push(&mut errors, "lastname", "Apellido obligatorio");
    }
    if !teacher.email.contains('@') {
        push(&mut errors, "email", "Correo invalido");
    }
    if let GradeAssignment::Year(year) = teacher.grade {
        if !(1..=6).contains(&year) {
            push(&mut errors, "grade", "Grado invalido");
        }
    }

    errors
}

pub fn validate_grade(grade: &GradeEntry) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !Dni::is_well_formed(grade.student_dni.as_str()) {
        push(&mut errors, "studentDni", "El DNI debe tener 8 digitos.");
    }
    if grade.course_id.as_str().is_empty() {
        push(&mut errors, "courseId", "El curso es obligatorio.");
    }
    if grade.evaluation == 0 || grade.evaluation > EVALUATIONS_PER_TERM {
        push(&mut errors, "evaluation", "La evaluacion debe estar entre 1 y 4.");
    }
    if !(0.0..=MAX_SCORE).contains(&grade.score) || grade.score.is_nan() {
        push(&mut errors, "score", "La nota debe estar entre 0 y 20.");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use colegio_core::CourseSlug;

    use crate::grade::Term;
    use crate::teacher::{StaffRole, TeacherSection};
    use crate::types::{EntityStatus, Level, Sex, Specialty};

    fn valid_student() -> Student {
        Student {
            dni: "11111111".into(),
            name: "Ana".to_string(),
            lastname: "Quispe".to_string(),
            email: "apoderado@example.com".to_string(),
            sex: Sex::F,
            birthdate: NaiveDate::from_ymd_opt(2016, 3, 14).unwrap(),
            age: 9,
            level: Level::Primaria,
            grade: 3,
            section: Section::A,
            shift: Shift::Manana,
            status: EntityStatus::Activo,
        }
    }

    #[test]
    fn valid_student_has_no_errors() {
        assert!(validate_student(&valid_student()).is_empty());
    }

    #[test]
    fn dni_length_is_enforced() {
        let mut s = valid_student();
        s.dni = "123".into();
        let errors = validate_student(&s);
        assert_eq!(errors.get("dni").unwrap(), "El DNI debe tener 8 digitos.");
    }

    #[test]
    fn section_must_match_shift() {
        let mut s = valid_student();
        s.section = Section::C;
        assert!(validate_student(&s).contains_key("section"));

        s.shift = Shift::Tarde;
        assert!(validate_student(&s).is_empty());

        s.section = Section::A;
        assert!(validate_student(&s).contains_key("section"));
    }

    #[test]
    fn night_shift_is_not_valid_for_students() {
        let mut s = valid_student();
        s.shift = Shift::Noche;
        assert!(validate_student(&s).contains_key("shift"));
    }

    #[test]
    fn age_bounds() {
        let mut s = valid_student();
        s.age = 4;
        assert!(validate_student(&s).contains_key("age"));
        s.age = 13;
        assert!(validate_student(&s).contains_key("age"));
        s.age = 5;
        assert!(validate_student(&s).is_empty());
    }

    #[test]
    fn teacher_grade_year_bounds() {
        let teacher = Teacher {
            dni: "40302010".into(),
            name: "Maria".to_string(),
            lastname: "Torres".to_string(),
            email: "maria.torres@ieprimaria.com".to_string(),
            sex: Sex::F,
            birthdate: NaiveDate::from_ymd_opt(1985, 7, 1).unwrap(),
            specialty: Specialty::Idiomas,
            grade: GradeAssignment::Year(7),
            section: TeacherSection::Rotativo,
            role: StaffRole::Docente,
            status: EntityStatus::Activo,
        };
        assert!(validate_teacher(&teacher).contains_key("grade"));

        let ok = Teacher {
            grade: GradeAssignment::All,
            ..teacher
        };
        assert!(validate_teacher(&ok).is_empty());
    }

    #[test]
    fn grade_entry_bounds() {
        let mut g = GradeEntry {
            student_dni: "11111111".into(),
            course_id: CourseSlug::new("matematica"),
            term: Term::First,
            evaluation: 1,
            score: 15.0,
            comment: None,
        };
        assert!(validate_grade(&g).is_empty());

        g.evaluation = 5;
        assert!(validate_grade(&g).contains_key("evaluation"));
        g.evaluation = 1;
        g.score = 20.5;
        assert!(validate_grade(&g).contains_key("score"));
        g.score = -0.1;
        assert!(validate_grade(&g).contains_key("score"));
    }
}
