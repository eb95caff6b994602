//! `colegio-academics` — the academic domain and its join layer.
//!
//! Roster entities (students, teachers, courses, schedules, enrollments,
//! grades) plus the pure functions that recombine them into role-scoped
//! views: visibility sets, term/final averages, transcripts, and dashboard
//! summaries. No IO, no HTTP, no storage — everything operates over
//! already-fetched data.

pub mod averages;
pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod grade;
pub mod schedule;
pub mod student;
pub mod teacher;
pub mod transcript;
pub mod types;
pub mod validate;
pub mod visibility;

pub use averages::{AcademicStatus, AverageReport, PASS_THRESHOLD, compute_averages};
pub use course::Course;
pub use dashboard::{DashboardStats, TeacherLoad, dashboard_stats};
pub use enrollment::Enrollment;
pub use grade::{GradeEntry, Term};
pub use schedule::Schedule;
pub use student::Student;
pub use teacher::{GradeAssignment, StaffRole, Teacher, TeacherSection};
pub use transcript::{TermCell, Transcript, TranscriptRow, transcript};
pub use types::{EntityStatus, Level, Section, Sex, Shift, Specialty};
pub use validate::{FieldErrors, validate_grade, validate_student, validate_teacher};
pub use visibility::{CourseScope, Viewer, visible_courses, visible_students};
