use thiserror::Error;

use crate::SessionClaims;

/// Denial reasons of the access guard.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Missing, invalid, or expired session token.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but the role/method/path combination is not permitted.
    #[error("access denied")]
    Forbidden,
}

/// Paths reachable without a session.
pub fn is_public_path(path: &str) -> bool {
    path.starts_with("/auth/login") || path == "/health"
}

fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

/// Role-based request policy: `authorize(method, path, identity)`.
///
/// A pure decision over the verified identity (if any), the HTTP method, and
/// the request path — no IO, no side effects. Callers verify token signature
/// and expiry first and pass `None` when verification failed.
///
/// - the login path is public;
/// - `ADMIN` may do anything;
/// - `DOCENTE` may use any method on grades, and GET on students, courses,
///   schedules, enrollments, and the derived report views;
/// - every other role is denied.
pub fn authorize(
    method: &str,
    path: &str,
    identity: Option<&SessionClaims>,
) -> Result<(), AccessError> {
    if is_public_path(path) {
        return Ok(());
    }

    let Some(claims) = identity else {
        return Err(AccessError::Unauthenticated);
    };

    if claims.role.is_admin() {
        return Ok(());
    }

    if claims.role.is_docente() {
        let allowed = match first_segment(path) {
            "grades" => true,
            "students" | "courses" | "schedules" | "enrollments" | "reports" => method == "GET",
            "auth" => path == "/auth/me" && method == "GET",
            _ => false,
        };
        return if allowed { Ok(()) } else { Err(AccessError::Forbidden) };
    }

    Err(AccessError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colegio_core::RecordId;

    use crate::Role;

    fn identity(role: Role) -> SessionClaims {
        SessionClaims {
            sub: RecordId::new(),
            email: "who@colegio.com".to_string(),
            role,
            name: "Quien".to_string(),
            teacher_dni: Some("40302010".into()),
            iat: 0,
            exp: 1,
        }
    }

    #[test]
    fn login_is_public() {
        assert!(authorize("POST", "/auth/login", None).is_ok());
        assert!(authorize("GET", "/health", None).is_ok());
    }

    #[test]
    fn missing_identity_is_unauthenticated() {
        assert_eq!(
            authorize("GET", "/students", None),
            Err(AccessError::Unauthenticated)
        );
        assert_eq!(
            authorize("GET", "/auth/me", None),
            Err(AccessError::Unauthenticated)
        );
    }

    #[test]
    fn admin_is_allowed_everywhere() {
        let admin = identity(Role::admin());
        for (method, path) in [
            ("GET", "/students"),
            ("POST", "/students"),
            ("DELETE", "/teachers/abc"),
            ("PUT", "/courses/slug/matematica"),
            ("POST", "/users"),
            ("GET", "/reports/dashboard"),
            ("DELETE", "/enrollments/xyz"),
        ] {
            assert!(authorize(method, path, Some(&admin)).is_ok(), "{method} {path}");
        }
    }

    #[test]
    fn docente_matrix() {
        let docente = identity(Role::docente());

        // Any method on grades.
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(authorize(method, "/grades", Some(&docente)).is_ok());
            assert!(authorize(method, "/grades/some-id", Some(&docente)).is_ok());
        }

        // GET-only on the roster resources.
        for resource in ["/students", "/courses", "/schedules", "/enrollments"] {
            assert!(authorize("GET", resource, Some(&docente)).is_ok(), "{resource}");
            for method in ["POST", "PUT", "DELETE"] {
                assert_eq!(
                    authorize(method, resource, Some(&docente)),
                    Err(AccessError::Forbidden),
                    "{method} {resource}"
                );
            }
        }

        // Derived views are read-only.
        assert!(authorize("GET", "/reports/averages", Some(&docente)).is_ok());
        assert!(authorize("GET", "/auth/me", Some(&docente)).is_ok());

        // Everything else is denied.
        assert_eq!(
            authorize("GET", "/teachers", Some(&docente)),
            Err(AccessError::Forbidden)
        );
        assert_eq!(
            authorize("GET", "/users", Some(&docente)),
            Err(AccessError::Forbidden)
        );
    }

    #[test]
    fn unknown_roles_are_denied() {
        let other = identity(Role::new("APODERADO"));
        assert_eq!(
            authorize("GET", "/students", Some(&other)),
            Err(AccessError::Forbidden)
        );
        assert_eq!(
            authorize("GET", "/grades", Some(&other)),
            Err(AccessError::Forbidden)
        );
    }
}
