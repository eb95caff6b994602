use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::{Course, EntityStatus};
use colegio_core::{CourseSlug, Dni, RecordId};
use colegio_store::{SchoolDb, Stored};

use crate::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/slug/:slug", get(get_by_slug).put(update_by_slug).delete(remove_by_slug))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub slug: Option<String>,
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Option<String>,
    pub status: Option<EntityStatus>,
}

/// Create payload: the slug is client-assigned but defaults to the
/// slugified name when omitted.
#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub slug: Option<CourseSlug>,
    pub name: String,
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Dni,
    pub status: EntityStatus,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<Course>>> {
    let rows = db.courses.filter(|c| {
        q.slug.as_deref().is_none_or(|s| c.slug.as_str() == s)
            && q.teacher_dni
                .as_deref()
                .is_none_or(|dni| c.teacher_dni.as_str() == dni)
            && q.status.is_none_or(|st| c.status == st)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<Course>>, ApiError> {
    db.courses.get(id).map(Json).ok_or_else(course_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<CourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("El nombre es obligatorio.".to_string()));
    }

    let slug = body
        .slug
        .unwrap_or_else(|| CourseSlug::from_name(&body.name));
    if db.course_by_slug(&slug).is_some() {
        return Err(ApiError::Conflict(format!("Ya existe el curso {slug}")));
    }

    let stored = db.courses.insert(Course {
        slug,
        name: body.name,
        teacher_dni: body.teacher_dni,
        status: body.status,
    });
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<Course>,
) -> Result<Json<Stored<Course>>, ApiError> {
    Ok(Json(db.courses.update(id, body)?))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.courses.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_by_slug(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(slug): Path<String>,
) -> Result<Json<Stored<Course>>, ApiError> {
    db.course_by_slug(&CourseSlug::from(slug))
        .map(Json)
        .ok_or_else(course_not_found)
}

/// Slug-keyed edit: resolve to the surrogate id, then mutate by id.
async fn update_by_slug(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(slug): Path<String>,
    Json(body): Json<Course>,
) -> Result<Json<Stored<Course>>, ApiError> {
    let existing = db
        .course_by_slug(&CourseSlug::from(slug))
        .ok_or_else(course_not_found)?;
    Ok(Json(db.courses.update(existing.id, body)?))
}

async fn remove_by_slug(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existing = db
        .course_by_slug(&CourseSlug::from(slug))
        .ok_or_else(course_not_found)?;
    db.courses.remove(existing.id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn course_not_found() -> ApiError {
    ApiError::NotFound("Curso no encontrado".to_string())
}
