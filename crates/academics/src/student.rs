use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use colegio_core::Dni;

use crate::types::{EntityStatus, Level, Section, Sex, Shift};

/// A student roster record.
///
/// Addressed by DNI for human-facing edits; the store's surrogate id is
/// attached only at the storage layer. `email` is the guardian's contact
/// address, used for report-card delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub dni: Dni,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub sex: Sex,
    pub birthdate: NaiveDate,
    pub age: u8,
    pub level: Level,
    pub grade: u8,
    pub section: Section,
    pub shift: Shift,
    pub status: EntityStatus,
}
