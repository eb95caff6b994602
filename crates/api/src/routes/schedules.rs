use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::{Schedule, Shift};
use colegio_core::RecordId;
use colegio_store::{SchoolDb, Stored};

use crate::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Option<String>,
    pub shift: Option<Shift>,
    pub grade: Option<u8>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<Schedule>>> {
    let rows = db.schedules.filter(|s| {
        q.teacher_dni
            .as_deref()
            .is_none_or(|dni| s.teacher_dni.as_str() == dni)
            && q.shift.is_none_or(|sh| s.shift == sh)
            && q.grade.is_none_or(|g| s.grade == g)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<Schedule>>, ApiError> {
    db.schedules.get(id).map(Json).ok_or_else(schedule_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<Schedule>,
) -> Result<impl IntoResponse, ApiError> {
    if db.teacher_by_dni(&body.teacher_dni).is_none() {
        return Err(ApiError::NotFound("Docente no encontrado".to_string()));
    }
    Ok((StatusCode::CREATED, Json(db.schedules.insert(body))))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<Schedule>,
) -> Result<Json<Stored<Schedule>>, ApiError> {
    Ok(Json(db.schedules.update(id, body)?))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.schedules.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn schedule_not_found() -> ApiError {
    ApiError::NotFound("Horario no encontrado".to_string())
}
