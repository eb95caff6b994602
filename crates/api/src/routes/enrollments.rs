use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::Enrollment;
use colegio_core::RecordId;
use colegio_store::{SchoolDb, Stored};

use crate::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<RecordId>,
    #[serde(rename = "studentDni")]
    pub student_dni: Option<String>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<Enrollment>>> {
    let rows = db.enrollments.filter(|e| {
        q.schedule_id.is_none_or(|id| e.schedule_id == id)
            && q.student_dni
                .as_deref()
                .is_none_or(|dni| e.student_dni.as_str() == dni)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<Enrollment>>, ApiError> {
    db.enrollments
        .get(id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Matricula no encontrada".to_string()))
}

/// Enrolling resolves both referenced records first; a miss on either
/// aborts the mutation.
async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<Enrollment>,
) -> Result<impl IntoResponse, ApiError> {
    if db.schedules.get(body.schedule_id).is_none() {
        return Err(ApiError::NotFound("Horario no encontrado".to_string()));
    }
    if db.student_by_dni(&body.student_dni).is_none() {
        return Err(ApiError::NotFound("Estudiante no encontrado".to_string()));
    }
    let duplicate = db
        .enrollments
        .find(|e| e.schedule_id == body.schedule_id && e.student_dni == body.student_dni);
    if duplicate.is_some() {
        return Err(ApiError::Conflict(
            "El alumno ya esta matriculado en este horario".to_string(),
        ));
    }

    Ok((StatusCode::CREATED, Json(db.enrollments.insert(body))))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.enrollments.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
