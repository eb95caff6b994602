use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::{EntityStatus, Section, Student, validate_student};
use colegio_core::{Dni, RecordId};
use colegio_store::{SchoolDb, Stored};

use crate::errors::{ApiError, ensure_valid};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route(
            "/dni/:dni",
            get(get_by_dni).put(update_by_dni).delete(remove_by_dni),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub dni: Option<String>,
    pub grade: Option<u8>,
    pub section: Option<Section>,
    pub status: Option<EntityStatus>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<Student>>> {
    let rows = db.students.filter(|s| {
        q.dni.as_deref().is_none_or(|dni| s.dni.as_str() == dni)
            && q.grade.is_none_or(|g| s.grade == g)
            && q.section.is_none_or(|sec| s.section == sec)
            && q.status.is_none_or(|st| s.status == st)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<Student>>, ApiError> {
    db.students
        .get(id)
        .map(Json)
        .ok_or_else(student_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<Student>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_valid(validate_student(&body))?;
    if db.student_by_dni(&body.dni).is_some() {
        return Err(ApiError::Conflict(format!(
            "Ya existe un estudiante con DNI {}",
            body.dni
        )));
    }
    let stored = db.students.insert(body);
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<Student>,
) -> Result<Json<Stored<Student>>, ApiError> {
    ensure_valid(validate_student(&body))?;
    Ok(Json(db.students.update(id, body)?))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.students.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
) -> Result<Json<Stored<Student>>, ApiError> {
    db.student_by_dni(&Dni::from(dni))
        .map(Json)
        .ok_or_else(student_not_found)
}

/// Dni-keyed edit: resolve the surrogate id, then mutate by id.
async fn update_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
    Json(body): Json<Student>,
) -> Result<Json<Stored<Student>>, ApiError> {
    let existing = db
        .student_by_dni(&Dni::from(dni))
        .ok_or_else(student_not_found)?;
    ensure_valid(validate_student(&body))?;
    Ok(Json(db.students.update(existing.id, body)?))
}

async fn remove_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existing = db
        .student_by_dni(&Dni::from(dni))
        .ok_or_else(student_not_found)?;
    db.students.remove(existing.id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn student_not_found() -> ApiError {
    ApiError::NotFound("Estudiante no encontrado".to_string())
}
