use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use colegio_core::Dni;

use crate::types::{EntityStatus, Sex, Specialty};

/// Grade a teacher is assigned to: a single year or the whole school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeAssignment {
    Year(u8),
    All,
}

// On the wire this is either a bare number or the literal "ALL".
impl Serialize for GradeAssignment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GradeAssignment::Year(n) => serializer.serialize_u8(*n),
            GradeAssignment::All => serializer.serialize_str("ALL"),
        }
    }
}

impl<'de> Deserialize<'de> for GradeAssignment {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Year(u8),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Year(n) => Ok(GradeAssignment::Year(n)),
            Repr::Text(s) if s == "ALL" => Ok(GradeAssignment::All),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a grade number or \"ALL\", got {s:?}"
            ))),
        }
    }
}

/// Section assignment: a fixed classroom or rotating across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeacherSection {
    A,
    B,
    C,
    D,
    Rotativo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Director,
    Docente,
}

/// A teaching-staff roster record.
///
/// Every teacher implies exactly one mirrored DOCENTE user account; that
/// orchestration lives at the API layer, the roster record itself knows
/// nothing about credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub dni: Dni,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub sex: Sex,
    pub birthdate: NaiveDate,
    pub specialty: Specialty,
    pub grade: GradeAssignment,
    pub section: TeacherSection,
    pub role: StaffRole,
    pub status: EntityStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_assignment_wire_format() {
        assert_eq!(serde_json::to_value(GradeAssignment::Year(3)).unwrap(), 3);
        assert_eq!(serde_json::to_value(GradeAssignment::All).unwrap(), "ALL");

        let year: GradeAssignment = serde_json::from_value(serde_json::json!(5)).unwrap();
        assert_eq!(year, GradeAssignment::Year(5));
        let all: GradeAssignment = serde_json::from_value(serde_json::json!("ALL")).unwrap();
        assert_eq!(all, GradeAssignment::All);
        assert!(serde_json::from_value::<GradeAssignment>(serde_json::json!("SOME")).is_err());
    }
}
