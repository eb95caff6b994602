use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a stored secret is encoded.
///
/// Decided when the credential is written, never inferred from the stored
/// value. `Plain` is the legacy convention for mirrored teacher accounts
/// (password = DNI) and seeded demo users; `Argon2` holds a PHC string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialEncoding {
    Plain,
    Argon2,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// A secret together with its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub secret: String,
    pub encoding: CredentialEncoding,
}

impl StoredCredential {
    /// Legacy plaintext credential, compared as opaque equal strings.
    pub fn plain(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            encoding: CredentialEncoding::Plain,
        }
    }

    /// Hash a password into an Argon2 PHC credential.
    pub fn argon2(password: &str) -> Result<Self, CredentialError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| CredentialError::Hash(e.to_string()))?;
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?
            .to_string();
        Ok(Self {
            secret: phc,
            encoding: CredentialEncoding::Argon2,
        })
    }

    /// Check a candidate password against this credential.
    pub fn verify(&self, candidate: &str) -> bool {
        match self.encoding {
            CredentialEncoding::Plain => self.secret == candidate,
            CredentialEncoding::Argon2 => match PasswordHash::new(&self.secret) {
                Ok(parsed) => Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
        }
    }
}
