use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use colegio_auth::{LoginSession, SessionIssuer};
use colegio_store::SchoolDb;

use crate::context::CurrentUser;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `POST /auth/login` — the only public endpoint besides the health probe.
pub async fn login(
    Extension(db): Extension<Arc<SchoolDb>>,
    Extension(sessions): Extension<Arc<SessionIssuer>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginSession>, ApiError> {
    let (email, password) = match (body.email.as_deref(), body.password.as_deref()) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(ApiError::Validation(
                "Email y password son requeridos".to_string(),
            ));
        }
    };

    let session = sessions.login(db.as_ref(), email, password, Utc::now())?;
    Ok(Json(session))
}

/// `GET /auth/me` — echo the verified session identity.
pub async fn me(
    Extension(current): Extension<CurrentUser>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": current.claims() }))
}
