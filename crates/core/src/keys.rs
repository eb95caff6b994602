//! Client-assigned natural keys.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// National identity number: the natural key of students and teachers.
///
/// Always exactly 8 ASCII digits. Stored verbatim; `parse` is the validating
/// constructor, the serde impls stay transparent so wire payloads round-trip
/// unchanged (form-level validation rejects malformed values before any
/// mutation reaches the store).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dni(String);

impl Dni {
    pub const LEN: usize = 8;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the raw value satisfies the 8-digit rule.
    pub fn is_well_formed(raw: &str) -> bool {
        raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit())
    }
}

impl core::fmt::Display for Dni {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Dni {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::invalid_id(format!(
                "Dni: expected {} digits, got {:?}",
                Self::LEN,
                s
            )))
        }
    }
}

impl From<&str> for Dni {
    /// Non-validating conversion for wire data; validation happens at the
    /// form layer, matching the original system.
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Dni {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Course identifier: a slug derived from the course name.
///
/// Client-assigned (the creating side decides the slug, typically
/// `CourseSlug::from_name`), used for human-facing lookups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseSlug(String);

impl CourseSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive a slug from a display name: lowercase, alphanumeric runs
    /// joined by single dashes.
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;
        for c in name.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                for lower in c.to_lowercase() {
                    slug.push(lower);
                }
            } else {
                pending_dash = true;
            }
        }
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CourseSlug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseSlug {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CourseSlug {
    fn from(value: String) -> Self {
        Self(value)
    }
}
