//! `colegio-store` — the resource-store collaborator.
//!
//! Generic in-memory collection CRUD keyed by store-assigned surrogate ids,
//! plus the natural-key lookups (DNI, course slug, email) the rest of the
//! system resolves through before mutating. This is the stand-in for the
//! file-backed store of the original deployment; persistence mechanics are
//! out of scope.

pub mod collection;
pub mod school;
pub mod seed;

pub use collection::{Collection, StoreError, Stored};
pub use school::SchoolDb;
