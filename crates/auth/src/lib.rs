//! `colegio-auth` — authentication/authorization boundary.
//!
//! Session issuance (credential check + signed token) and the role-based
//! access policy. This crate is intentionally decoupled from HTTP and
//! storage: the api crate adapts it to axum, the store crate implements
//! [`CredentialStore`].

pub mod claims;
pub mod credentials;
pub mod policy;
pub mod roles;
pub mod session;
pub mod token;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use credentials::{CredentialEncoding, CredentialError, StoredCredential};
pub use policy::{AccessError, authorize, is_public_path};
pub use roles::Role;
pub use session::{AuthError, CredentialStore, Identity, LoginSession, SessionIssuer, UserRecord};
pub use token::{Hs256TokenCodec, SESSION_TTL_SECS, TokenError};
