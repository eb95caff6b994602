//! `colegio-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no HTTP):
//! typed identifiers, natural keys, and the shared error model.

pub mod error;
pub mod id;
pub mod keys;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use keys::{CourseSlug, Dni};
