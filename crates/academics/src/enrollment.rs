use serde::{Deserialize, Serialize};

use colegio_core::{Dni, RecordId};

/// Membership of a student in a schedule block (many-to-many join).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "scheduleId")]
    pub schedule_id: RecordId,
    #[serde(rename = "studentDni")]
    pub student_dni: Dni,
}
