use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::SessionClaims;

/// Fixed session lifetime: 8 hours. There is no refresh mechanism; expiry
/// forces a fresh login.
pub const SESSION_TTL_SECS: i64 = 8 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign session token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("invalid session token")]
    Verify(#[source] jsonwebtoken::errors::Error),
}

/// HS256 signer/verifier for session tokens.
///
/// One instance per process, built from the configured signing secret.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        // Default validation checks `exp` against the wall clock.
        let validation = Validation::new(Algorithm::HS256);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(TokenError::Sign)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, TokenError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verify)
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec").finish_non_exhaustive()
    }
}
