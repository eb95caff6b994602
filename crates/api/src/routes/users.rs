//! User-account administration. The role policy gates this whole router to
//! ADMIN sessions.

use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_auth::UserRecord;
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
    pub email: Option<String>,
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Option<String>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<UserRecord>>> {
    let rows = db.users.filter(|u| {
        q.email.as_deref().is_none_or(|e| u.email == e)
            && q.teacher_dni
                .as_deref()
                .is_none_or(|dni| u.teacher_dni.as_ref().is_some_and(|d| d.as_str() == dni))
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<UserRecord>>, ApiError> {
    db.users.get(id).map(Json).ok_or_else(user_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<UserRecord>,
) -> Result<impl IntoResponse, ApiError> {
    if body.email.trim().is_empty() || !body.email.contains('@') {
        return Err(ApiError::Validation("Correo invalido".to_string()));
    }
    if db.user_by_email(&body.email).is_some() {
        return Err(ApiError::Conflict(format!(
            "Ya existe un usuario con correo {}",
            body.email
        )));
    }
    Ok((StatusCode::CREATED, Json(db.users.insert(body))))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<UserRecord>,
) -> Result<Json<Stored<UserRecord>>, ApiError> {
    Ok(Json(db.users.update(id, body)?))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    db.users.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("Usuario no encontrado".to_string())
}
