use serde::{Deserialize, Serialize};

use colegio_core::{CourseSlug, Dni};

use crate::types::EntityStatus;

/// A course offering.
///
/// The slug is the client-assigned natural key (derived from the name);
/// grades reference courses by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub slug: CourseSlug,
    pub name: String,
    #[serde(rename = "teacherDni")]
    pub teacher_dni: Dni,
    pub status: EntityStatus,
}
