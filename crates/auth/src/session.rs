use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use colegio_core::{Dni, RecordId};

use crate::{Hs256TokenCodec, Role, SESSION_TTL_SECS, SessionClaims, StoredCredential, TokenError};

/// A user account as the credential store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(rename = "teacherDni", skip_serializing_if = "Option::is_none", default)]
    pub teacher_dni: Option<Dni>,
    pub credential: StoredCredential,
}

/// Lookup seam to the credential-store collaborator.
pub trait CredentialStore: Send + Sync {
    /// Find a user by email, returning its surrogate id and record.
    fn find_by_email(&self, email: &str) -> Option<(RecordId, UserRecord)>;
}

/// The identity surfaced to clients next to the token (no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "teacherDni", skip_serializing_if = "Option::is_none", default)]
    pub teacher_dni: Option<Dni>,
}

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub user: Identity,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or failed password check; the two cases are
    /// indistinguishable from the outside.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Validates credentials and mints signed, time-limited session tokens.
pub struct SessionIssuer {
    codec: Hs256TokenCodec,
}

impl SessionIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            codec: Hs256TokenCodec::new(secret),
        }
    }

    /// `login(email, password)` per the auth contract.
    ///
    /// The clock is a parameter so expiry math stays deterministic in tests.
    pub fn login(
        &self,
        store: &dyn CredentialStore,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginSession, AuthError> {
        let Some((id, user)) = store.find_by_email(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if !user.credential.verify(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Self::claims_for(id, &user, now);
        let token = self.codec.encode(&claims)?;
        tracing::info!(email = %user.email, role = %user.role, "session issued");

        Ok(LoginSession {
            token,
            user: Identity {
                id,
                name: user.name,
                email: user.email,
                role: user.role,
                teacher_dni: user.teacher_dni,
            },
        })
    }

    /// Verify a presented token (signature + expiry).
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.codec.decode(token)
    }

    fn claims_for(id: RecordId, user: &UserRecord, now: DateTime<Utc>) -> SessionClaims {
        let iat = now.timestamp();
        SessionClaims {
            sub: id,
            email: user.email.clone(),
            role: user.role.clone(),
            name: user.name.clone(),
            teacher_dni: user.teacher_dni.clone(),
            iat,
            exp: iat + SESSION_TTL_SECS,
        }
    }
}

impl core::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionIssuer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStore(Vec<(RecordId, UserRecord)>);

    impl CredentialStore for FixedStore {
        fn find_by_email(&self, email: &str) -> Option<(RecordId, UserRecord)> {
            self.0.iter().find(|(_, u)| u.email == email).cloned()
        }
    }

    fn store() -> FixedStore {
        FixedStore(vec![
            (
                RecordId::new(),
                UserRecord {
                    email: "admin@colegio.com".to_string(),
                    name: "Direccion".to_string(),
                    role: Role::admin(),
                    teacher_dni: None,
                    credential: StoredCredential::plain("123456"),
                },
            ),
            (
                RecordId::new(),
                UserRecord {
                    email: "maria.torres@ieprimaria.com".to_string(),
                    name: "Maria Torres".to_string(),
                    role: Role::docente(),
                    teacher_dni: Some("40302010".into()),
                    credential: StoredCredential::argon2("docente123").unwrap(),
                },
            ),
        ])
    }

    #[test]
    fn login_succeeds_iff_password_check_passes() {
        let issuer = SessionIssuer::new(b"test-secret");
        let store = store();
        let now = Utc::now();

        let session = issuer
            .login(&store, "admin@colegio.com", "123456", now)
            .unwrap();
        assert!(session.user.role.is_admin());

        // Hashed credential verified through argon2, not string equality.
        let session = issuer
            .login(&store, "maria.torres@ieprimaria.com", "docente123", now)
            .unwrap();
        assert_eq!(session.user.teacher_dni, Some("40302010".into()));

        assert!(matches!(
            issuer.login(&store, "admin@colegio.com", "wrong", now),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            issuer.login(&store, "nobody@colegio.com", "123456", now),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn issued_token_verifies_and_carries_identity_claims() {
        let issuer = SessionIssuer::new(b"test-secret");
        let store = store();
        let now = Utc::now();

        let session = issuer
            .login(&store, "admin@colegio.com", "123456", now)
            .unwrap();
        let claims = issuer.verify(&session.token).unwrap();

        assert_eq!(claims.email, "admin@colegio.com");
        assert!(claims.role.is_admin());
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
        assert_eq!(claims.sub, session.user.id);
    }
}
