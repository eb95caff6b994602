//! Derived, role-scoped views over the raw collections: the dashboard
//! summary, the per-student averages table, and the transcript grid.

use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use colegio_academics::{
    AcademicStatus, DashboardStats, Section, Transcript, compute_averages, dashboard_stats,
    transcript, visible_courses, visible_students,
};
use colegio_core::Dni;
use colegio_store::SchoolDb;

use crate::context::CurrentUser;
use crate::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/averages", get(averages))
        .route("/transcript/:dni", get(student_transcript))
}

async fn dashboard(
    Extension(db): Extension<Arc<SchoolDb>>,
    Extension(current): Extension<CurrentUser>,
) -> Json<DashboardStats> {
    let students: Vec<_> = db.students.list().into_iter().map(|s| s.record).collect();
    let teachers: Vec<_> = db.teachers.list().into_iter().map(|t| t.record).collect();
    let courses: Vec<_> = db.courses.list().into_iter().map(|c| c.record).collect();
    let schedules = db.schedule_pairs();
    let enrollments: Vec<_> = db.enrollments.list().into_iter().map(|e| e.record).collect();

    Json(dashboard_stats(
        &current.viewer(),
        &students,
        &teachers,
        &courses,
        &schedules,
        &enrollments,
    ))
}

#[derive(Debug, Deserialize)]
pub struct AveragesQuery {
    pub grade: Option<u8>,
    pub section: Option<Section>,
}

/// One row of the averages table, in the shape the legacy page rendered.
#[derive(Debug, Serialize)]
pub struct AverageRow {
    #[serde(rename = "studentDni")]
    pub student_dni: Dni,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub term1: Option<f64>,
    pub term2: Option<f64>,
    pub term3: Option<f64>,
    #[serde(rename = "finalAvg")]
    pub final_avg: Option<f64>,
    pub status: AcademicStatus,
}

/// Averages for every enrolled, active student visible to the session,
/// optionally filtered by grade/section.
async fn averages(
    Extension(db): Extension<Arc<SchoolDb>>,
    Extension(current): Extension<CurrentUser>,
    Query(q): Query<AveragesQuery>,
) -> Json<Vec<AverageRow>> {
    let viewer = current.viewer();
    let students: Vec<_> = db.students.list().into_iter().map(|s| s.record).collect();
    let schedules = db.schedule_pairs();
    let enrollments: Vec<_> = db.enrollments.list().into_iter().map(|e| e.record).collect();
    let grades: Vec<_> = db.grades.list().into_iter().map(|g| g.record).collect();

    let visible = visible_students(
        &viewer,
        &students,
        schedules.iter().map(|(id, s)| (*id, s)),
        &enrollments,
    );
    let scope = visible_courses(&viewer, schedules.iter().map(|(_, s)| s));

    let rows = students
        .iter()
        .filter(|s| s.status.is_active())
        .filter(|s| visible.contains(&s.dni))
        .filter(|s| enrollments.iter().any(|e| e.student_dni == s.dni))
        .filter(|s| q.grade.is_none_or(|g| s.grade == g))
        .filter(|s| q.section.is_none_or(|sec| s.section == sec))
        .map(|s| {
            let report = compute_averages(&s.dni, &grades, &scope);
            AverageRow {
                student_dni: s.dni.clone(),
                student_name: format!("{} {}", s.name, s.lastname),
                term1: report.per_term[0],
                term2: report.per_term[1],
                term3: report.per_term[2],
                final_avg: report.final_avg,
                status: report.status,
            }
        })
        .collect();

    Json(rows)
}

/// The transcript grid behind a student's report card.
async fn student_transcript(
    Extension(db): Extension<Arc<SchoolDb>>,
    Extension(current): Extension<CurrentUser>,
    Path(dni): Path<String>,
) -> Result<Json<Transcript>, ApiError> {
    let dni = Dni::from(dni);
    if db.student_by_dni(&dni).is_none() {
        return Err(ApiError::NotFound("Estudiante no encontrado".to_string()));
    }

    let viewer = current.viewer();
    let schedules = db.schedule_pairs();
    let scope = visible_courses(&viewer, schedules.iter().map(|(_, s)| s));
    let grades: Vec<_> = db.grades.list().into_iter().map(|g| g.record).collect();
    let courses: Vec<_> = db.courses.list().into_iter().map(|c| c.record).collect();

    Ok(Json(transcript(&dni, &grades, &courses, &scope)))
}
