use colegio_academics::{Course, Enrollment, GradeEntry, Schedule, Student, Teacher};
use colegio_auth::{CredentialStore, UserRecord};
use colegio_core::{CourseSlug, Dni, RecordId};

use crate::collection::{Collection, Stored};

/// All resource collections of the school, one per REST resource.
///
/// Natural-key helpers implement the lookup-then-mutate pattern: resolve a
/// DNI/slug/email to the surrogate id first, then act on the id. The
/// read-then-act sequence carries no transactional guarantee; a concurrent
/// delete between the two steps surfaces as NotFound on the second.
#[derive(Debug, Default)]
pub struct SchoolDb {
    pub students: Collection<Student>,
    pub teachers: Collection<Teacher>,
    pub courses: Collection<Course>,
    pub schedules: Collection<Schedule>,
    pub enrollments: Collection<Enrollment>,
    pub grades: Collection<GradeEntry>,
    pub users: Collection<UserRecord>,
}

impl SchoolDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn student_by_dni(&self, dni: &Dni) -> Option<Stored<Student>> {
        self.students.find(|s| &s.dni == dni)
    }

    pub fn teacher_by_dni(&self, dni: &Dni) -> Option<Stored<Teacher>> {
        self.teachers.find(|t| &t.dni == dni)
    }

    pub fn course_by_slug(&self, slug: &CourseSlug) -> Option<Stored<Course>> {
        self.courses.find(|c| &c.slug == slug)
    }

    pub fn user_by_email(&self, email: &str) -> Option<Stored<UserRecord>> {
        self.users.find(|u| u.email == email)
    }

    pub fn user_by_teacher_dni(&self, dni: &Dni) -> Option<Stored<UserRecord>> {
        self.users.find(|u| u.teacher_dni.as_ref() == Some(dni))
    }

    /// Schedules as `(id, record)` pairs for the join layer.
    pub fn schedule_pairs(&self) -> Vec<(RecordId, Schedule)> {
        self.schedules
            .list()
            .into_iter()
            .map(|s| (s.id, s.record))
            .collect()
    }
}

impl CredentialStore for SchoolDb {
    fn find_by_email(&self, email: &str) -> Option<(RecordId, UserRecord)> {
        self.user_by_email(email).map(|u| (u.id, u.record))
    }
}
