use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::{GradeEntry, Term, validate_grade};
use colegio_core::RecordId;
use colegio_store::{SchoolDb, Stored};

use crate::errors::{ApiError, ensure_valid};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "studentDni")]
    pub student_dni: Option<String>,
    #[serde(rename = "courseId")]
    pub course_id: Option<String>,
    pub term: Option<Term>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<GradeEntry>>> {
    let rows = db.grades.filter(|g| {
        q.student_dni
            .as_deref()
            .is_none_or(|dni| g.student_dni.as_str() == dni)
            && q.course_id
                .as_deref()
                .is_none_or(|c| g.course_id.as_str() == c)
            && q.term.is_none_or(|t| g.term == t)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<GradeEntry>>, ApiError> {
    db.grades.get(id).map(Json).ok_or_else(grade_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<GradeEntry>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_valid(validate_grade(&body))?;
    if db.student_by_dni(&body.student_dni).is_none() {
        return Err(ApiError::NotFound("Estudiante no encontrado".to_string()));
    }
    Ok((StatusCode::CREATED, Json(db.grades.insert(body))))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<GradeEntry>,
) -> Result<Json<Stored<GradeEntry>>, ApiError> {
    ensure_valid(validate_grade(&body))?;
    Ok(Json(db.grades.update(id, body)?))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.grades.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn grade_not_found() -> ApiError {
    ApiError::NotFound("Nota no encontrada".to_string())
}
