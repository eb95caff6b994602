use serde::{Deserialize, Serialize};

use colegio_core::{CourseSlug, Dni};

/// Grading period (bimestre). Three per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    First,
    Second,
    Third,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::First, Term::Second, Term::Third];

    /// Zero-based position, for per-term arrays.
    pub fn index(&self) -> usize {
        match self {
            Term::First => 0,
            Term::Second => 1,
            Term::Third => 2,
        }
    }

    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }
}

impl TryFrom<u8> for Term {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Term::First),
            2 => Ok(Term::Second),
            3 => Ok(Term::Third),
            other => Err(format!("term must be 1-3, got {other}")),
        }
    }
}

impl From<Term> for u8 {
    fn from(value: Term) -> Self {
        value.number()
    }
}

/// One scored evaluation for a student in a course.
///
/// Up to four evaluations per term; absent slots are simply missing records,
/// never zero-filled. Scores run on the 0-20 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    #[serde(rename = "studentDni")]
    pub student_dni: Dni,
    #[serde(rename = "courseId")]
    pub course_id: CourseSlug,
    pub term: Term,
    pub evaluation: u8,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
}

pub const MAX_SCORE: f64 = 20.0;
pub const EVALUATIONS_PER_TERM: u8 = 4;
