//! Demo dataset, mirroring the accounts the original deployment shipped
//! with (`admin@colegio.com` / `123456`, `maria.torres@ieprimaria.com` /
//! `docente123`) plus a small roster so the derived views have data.

use chrono::NaiveDate;

use colegio_academics::{
    Course, Enrollment, EntityStatus, GradeAssignment, GradeEntry, Level, Schedule, Section, Sex,
    Shift, Specialty, StaffRole, Student, Teacher, TeacherSection, Term,
};
use colegio_auth::{Role, StoredCredential, UserRecord};

use crate::school::SchoolDb;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("static seed date")
}

/// Build a seeded database.
pub fn seeded() -> SchoolDb {
    let db = SchoolDb::new();

    db.users.insert(UserRecord {
        email: "admin@colegio.com".to_string(),
        name: "Direccion Academica".to_string(),
        role: Role::admin(),
        teacher_dni: None,
        credential: StoredCredential::plain("123456"),
    });

    db.teachers.insert(Teacher {
        dni: "40302010".into(),
        name: "Maria".to_string(),
        lastname: "Torres".to_string(),
        email: "maria.torres@ieprimaria.com".to_string(),
        sex: Sex::F,
        birthdate: date(1985, 7, 1),
        specialty: Specialty::PrimariaGeneral,
        grade: GradeAssignment::Year(3),
        section: TeacherSection::A,
        role: StaffRole::Docente,
        status: EntityStatus::Activo,
    });
    db.users.insert(UserRecord {
        email: "maria.torres@ieprimaria.com".to_string(),
        name: "Maria Torres".to_string(),
        role: Role::docente(),
        teacher_dni: Some("40302010".into()),
        credential: StoredCredential::plain("docente123"),
    });

    db.teachers.insert(Teacher {
        dni: "50607080".into(),
        name: "Jorge".to_string(),
        lastname: "Salas".to_string(),
        email: "jorge.salas@ieprimaria.com".to_string(),
        sex: Sex::M,
        birthdate: date(1979, 11, 23),
        specialty: Specialty::Deportes,
        grade: GradeAssignment::All,
        section: TeacherSection::Rotativo,
        role: StaffRole::Docente,
        status: EntityStatus::Activo,
    });
    db.users.insert(UserRecord {
        email: "jorge.salas@ieprimaria.com".to_string(),
        name: "Jorge Salas".to_string(),
        role: Role::docente(),
        teacher_dni: Some("50607080".into()),
        credential: StoredCredential::plain("50607080"),
    });

    for course in [
        Course {
            slug: "matematica".into(),
            name: "Matematica".to_string(),
            teacher_dni: "40302010".into(),
            status: EntityStatus::Activo,
        },
        Course {
            slug: "comunicacion".into(),
            name: "Comunicacion".to_string(),
            teacher_dni: "40302010".into(),
            status: EntityStatus::Activo,
        },
        Course {
            slug: "educacion-fisica".into(),
            name: "Educacion Fisica".to_string(),
            teacher_dni: "50607080".into(),
            status: EntityStatus::Activo,
        },
    ] {
        db.courses.insert(course);
    }

    let students = [
        ("21212121", "Lucia", "Mendoza", 8, 3, Section::A, Shift::Manana),
        ("31313131", "Pedro", "Castillo", 9, 3, Section::A, Shift::Manana),
        ("41414141", "Rosa", "Huaman", 10, 4, Section::C, Shift::Tarde),
    ];
    for (dni, name, lastname, age, grade, section, shift) in students {
        db.students.insert(Student {
            dni: dni.into(),
            name: name.to_string(),
            lastname: lastname.to_string(),
            email: format!("apoderado.{}@example.com", name.to_lowercase()),
            sex: Sex::F,
            birthdate: date(2016, 1, 15),
            age,
            level: Level::Primaria,
            grade,
            section,
            shift,
            status: EntityStatus::Activo,
        });
    }

    let third_a = db.schedules.insert(Schedule {
        teacher_dni: "40302010".into(),
        shift: Shift::Manana,
        grade: 3,
        section: Section::A,
        courses: vec!["matematica".into(), "comunicacion".into()],
    });
    db.schedules.insert(Schedule {
        teacher_dni: "50607080".into(),
        shift: Shift::Tarde,
        grade: 4,
        section: Section::C,
        courses: vec!["educacion-fisica".into()],
    });

    for dni in ["21212121", "31313131"] {
        db.enrollments.insert(Enrollment {
            schedule_id: third_a.id,
            student_dni: dni.into(),
        });
    }

    for (dni, course, term, evaluation, score) in [
        ("21212121", "matematica", Term::First, 1, 14.0),
        ("21212121", "matematica", Term::First, 2, 16.0),
        ("21212121", "comunicacion", Term::First, 1, 12.5),
        ("31313131", "matematica", Term::First, 1, 9.0),
    ] {
        db.grades.insert(GradeEntry {
            student_dni: dni.into(),
            course_id: course.into(),
            term,
            evaluation,
            score,
            comment: None,
        });
    }

    db
}
