//! Application wiring: router tree, shared state, middleware order.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};
use tower::ServiceBuilder;

use colegio_auth::SessionIssuer;
use colegio_store::SchoolDb;

use crate::middleware::{self, AuthState};
use crate::routes;

/// Build the full router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(jwt_secret: &str, db: Arc<SchoolDb>) -> Router {
    let sessions = Arc::new(SessionIssuer::new(jwt_secret.as_bytes()));
    let auth_state = AuthState {
        sessions: sessions.clone(),
    };

    // Protected routes: authenticate, then the role policy — in that order.
    let protected = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .nest("/students", routes::students::router())
        .nest("/teachers", routes::teachers::router())
        .nest("/courses", routes::courses::router())
        .nest("/schedules", routes::schedules::router())
        .nest("/enrollments", routes::enrollments::router())
        .nest("/grades", routes::grades::router())
        .nest("/users", routes::users::router())
        .nest("/reports", routes::reports::router())
        .layer(axum::middleware::from_fn(middleware::enforce_policy))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::authenticate,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::auth::login))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(db))
                .layer(Extension(sessions)),
        )
}
