use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use colegio_core::{Dni, RecordId};

use crate::Role;

/// Session token claims.
///
/// The minimal identity the rest of the system needs once a token has been
/// decoded and its signature verified: who is acting, under which role, and
/// (for teaching staff) which teacher roster row they are linked to.
/// `iat`/`exp` are unix-epoch seconds, the shape `jsonwebtoken` validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: surrogate id of the user record.
    pub sub: RecordId,

    pub email: String,

    pub role: Role,

    /// Display name, echoed back by `/auth/me`.
    pub name: String,

    /// Natural key of the linked teacher, for DOCENTE sessions.
    #[serde(rename = "teacherDni", skip_serializing_if = "Option::is_none", default)]
    pub teacher_dni: Option<Dni>,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiration, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claim time window.
///
/// Signature verification lives in [`crate::token`]; this checks only the
/// `iat`/`exp` pair against the supplied instant, so expiry behavior is
/// testable without minting real tokens.
pub fn validate_claims(
    claims: &SessionClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claims(iat: i64, exp: i64) -> SessionClaims {
        SessionClaims {
            sub: RecordId::new(),
            email: "admin@colegio.com".to_string(),
            role: Role::admin(),
            name: "Admin".to_string(),
            teacher_dni: None,
            iat,
            exp,
        }
    }

    #[test]
    fn accepted_until_expiry_then_rejected() {
        let c = claims(1_000, 1_000 + crate::SESSION_TTL_SECS);

        let just_issued = Utc.timestamp_opt(1_000, 0).unwrap();
        assert!(validate_claims(&c, just_issued).is_ok());

        let almost = Utc.timestamp_opt(c.exp - 1, 0).unwrap();
        assert!(validate_claims(&c, almost).is_ok());

        let at_expiry = Utc.timestamp_opt(c.exp, 0).unwrap();
        assert_eq!(validate_claims(&c, at_expiry), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_issue_rejected() {
        let c = claims(5_000, 6_000);
        let before = Utc.timestamp_opt(4_999, 0).unwrap();
        assert_eq!(validate_claims(&c, before), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_window_rejected() {
        let c = claims(6_000, 6_000);
        let now = Utc.timestamp_opt(6_000, 0).unwrap();
        assert_eq!(
            validate_claims(&c, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn teacher_dni_round_trips_as_camel_case() {
        let mut c = claims(1, 2);
        c.teacher_dni = Some("87654321".into());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["teacherDni"], "87654321");
        let back: SessionClaims = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }
}
