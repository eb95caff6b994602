//! HTTP routes, one file per resource.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod reports;
pub mod schedules;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;
