//! Term and final averages.
//!
//! Averages run over the evaluations that exist: an empty term contributes
//! nothing (it is excluded from the final mean, not counted as zero), and a
//! student with no qualifying grades at all is SIN_NOTA.

use serde::{Deserialize, Serialize};

use colegio_core::Dni;

use crate::grade::GradeEntry;
use crate::visibility::CourseScope;

/// Passing cut on the 0-20 scale. Averages below this round-up boundary are
/// DESAPROBADO.
pub const PASS_THRESHOLD: f64 = 11.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcademicStatus {
    Aprobado,
    Desaprobado,
    SinNota,
}

/// Per-term and final averages for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageReport {
    /// Mean score per term, `None` where the term has no evaluations.
    #[serde(rename = "perTerm")]
    pub per_term: [Option<f64>; 3],
    /// Mean of the existing term averages.
    #[serde(rename = "finalAvg")]
    pub final_avg: Option<f64>,
    pub status: AcademicStatus,
}

/// Two-decimal rounding, applied at each aggregation step exactly as the
/// legacy report did.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(round2(values.iter().sum::<f64>() / values.len() as f64))
    }
}

/// Compute a student's averages over the grades visible in `scope`.
///
/// Pure over already-fetched data; an empty grades slice is simply a
/// SIN_NOTA report.
pub fn compute_averages<'a>(
    student: &Dni,
    grades: impl IntoIterator<Item = &'a GradeEntry>,
    scope: &CourseScope,
) -> AverageReport {
    let mut per_term_scores: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for g in grades {
        if &g.student_dni == student && scope.allows(&g.course_id) {
            per_term_scores[g.term.index()].push(g.score);
        }
    }

    let per_term = [
        mean(&per_term_scores[0]),
        mean(&per_term_scores[1]),
        mean(&per_term_scores[2]),
    ];

    let existing: Vec<f64> = per_term.iter().flatten().copied().collect();
    let final_avg = mean(&existing);

    let status = match final_avg {
        None => AcademicStatus::SinNota,
        Some(avg) if avg >= PASS_THRESHOLD => AcademicStatus::Aprobado,
        Some(_) => AcademicStatus::Desaprobado,
    };

    AverageReport {
        per_term,
        final_avg,
        status,
    }
}
