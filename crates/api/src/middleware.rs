//! Request middleware: authentication, then the role policy — the same
//! two-stage gate the original server mounted in front of its router.

use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use colegio_auth::{AccessError, SessionIssuer, policy};

use crate::context::CurrentUser;
use crate::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionIssuer>,
}

/// Verify the bearer token and stash the session claims on the request.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())
        .ok_or_else(|| ApiError::Unauthenticated("Token requerido".to_string()))?;

    let claims = state
        .sessions
        .verify(token)
        .map_err(|_| ApiError::Unauthenticated("Token invalido".to_string()))?;

    req.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(req).await)
}

/// Apply the role policy to the (method, path, identity) triple.
///
/// Runs after `authenticate`, so a missing `CurrentUser` maps to the
/// policy's Unauthenticated branch rather than panicking.
pub async fn enforce_policy(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let current = req.extensions().get::<CurrentUser>().cloned();
    let identity = current.as_ref().map(|c| c.claims());

    // Nested routers see a stripped path; the original URI has the full one.
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|u| u.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    match policy::authorize(req.method().as_str(), &path, identity) {
        Ok(()) => Ok(next.run(req).await),
        Err(AccessError::Unauthenticated) => {
            Err(ApiError::Unauthenticated("Token requerido".to_string()))
        }
        Err(AccessError::Forbidden) => {
            let message = match identity {
                Some(claims) if claims.role.is_docente() => {
                    "Acceso no autorizado para docentes"
                }
                _ => "Rol no autorizado",
            };
            tracing::debug!(%path, method = %req.method(), "request denied");
            Err(ApiError::Forbidden(message.to_string()))
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
