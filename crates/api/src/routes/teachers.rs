use std::sync::Arc;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use colegio_academics::{EntityStatus, Teacher, validate_teacher};
use colegio_auth::{Role, StoredCredential, UserRecord};
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
    pub status: Option<EntityStatus>,
}

async fn list(
    Extension(db): Extension<Arc<SchoolDb>>,
    Query(q): Query<ListQuery>,
) -> Json<Vec<Stored<Teacher>>> {
    let rows = db.teachers.filter(|t| {
        q.dni.as_deref().is_none_or(|dni| t.dni.as_str() == dni)
            && q.status.is_none_or(|st| t.status == st)
    });
    Json(rows)
}

async fn get_one(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<Json<Stored<Teacher>>, ApiError> {
    db.teachers.get(id).map(Json).ok_or_else(teacher_not_found)
}

async fn create(
    Extension(db): Extension<Arc<SchoolDb>>,
    Json(body): Json<Teacher>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_valid(validate_teacher(&body))?;
    if db.teacher_by_dni(&body.dni).is_some() {
        return Err(ApiError::Conflict(format!(
            "Ya existe un docente con DNI {}",
            body.dni
        )));
    }
    let stored = db.teachers.insert(body);
    sync_mirrored_user(&db, &stored.record);
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
    Json(body): Json<Teacher>,
) -> Result<Json<Stored<Teacher>>, ApiError> {
    ensure_valid(validate_teacher(&body))?;
    let stored = db.teachers.update(id, body)?;
    sync_mirrored_user(&db, &stored.record);
    Ok(Json(stored))
}

async fn remove(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, ApiError> {
    let existing = db.teachers.get(id).ok_or_else(teacher_not_found)?;
    cascade_remove(&db, &existing)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
) -> Result<Json<Stored<Teacher>>, ApiError> {
    db.teacher_by_dni(&Dni::from(dni))
        .map(Json)
        .ok_or_else(teacher_not_found)
}

async fn update_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
    Json(body): Json<Teacher>,
) -> Result<Json<Stored<Teacher>>, ApiError> {
    let existing = db
        .teacher_by_dni(&Dni::from(dni))
        .ok_or_else(teacher_not_found)?;
    ensure_valid(validate_teacher(&body))?;
    let stored = db.teachers.update(existing.id, body)?;
    sync_mirrored_user(&db, &stored.record);
    Ok(Json(stored))
}

async fn remove_by_dni(
    Extension(db): Extension<Arc<SchoolDb>>,
    Path(dni): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existing = db
        .teacher_by_dni(&Dni::from(dni))
        .ok_or_else(teacher_not_found)?;
    cascade_remove(&db, &existing)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Upsert the DOCENTE user account mirroring a teacher row.
///
/// Legacy convention kept deliberately: the mirrored password is the DNI,
/// stored as a plain credential. Second step of the two-step orchestration;
/// a teacher row already written stays written even if this step misses.
fn sync_mirrored_user(db: &SchoolDb, teacher: &Teacher) {
    let payload = UserRecord {
        email: teacher.email.clone(),
        name: format!("{} {}", teacher.name, teacher.lastname),
        role: Role::docente(),
        teacher_dni: Some(teacher.dni.clone()),
        credential: StoredCredential::plain(teacher.dni.as_str()),
    };

    match db.user_by_teacher_dni(&teacher.dni) {
        Some(existing) => {
            if db.users.update(existing.id, payload).is_err() {
                tracing::warn!(dni = %teacher.dni, "mirrored user vanished during sync");
            }
        }
        None => {
            db.users.insert(payload);
        }
    }
}

/// Delete the mirrored user first, then the teacher row, so an interrupted
/// cascade can never leave a login without its roster row.
fn cascade_remove(db: &SchoolDb, teacher: &Stored<Teacher>) -> Result<(), ApiError> {
    if let Some(user) = db.user_by_teacher_dni(&teacher.record.dni) {
        db.users.remove(user.id)?;
    }
    db.teachers.remove(teacher.id)?;
    Ok(())
}

fn teacher_not_found() -> ApiError {
    ApiError::NotFound("Docente no encontrado".to_string())
}
