//! Per-course transcript data: the numbers behind a printable report card.
//!
//! Rendering (HTML, print layout) is out of scope; this produces the grid a
//! client needs — per course and term, the individual evaluation scores, the
//! term average, and whether it clears the passing cut.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use colegio_core::{CourseSlug, Dni};

use crate::averages::{AverageReport, PASS_THRESHOLD, compute_averages, round2};
use crate::course::Course;
use crate::grade::{EVALUATIONS_PER_TERM, GradeEntry, Term};
use crate::visibility::CourseScope;

/// One term's cell in the transcript grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCell {
    /// Scores of evaluations 1-4; `None` where the slot was never graded.
    pub evaluations: [Option<f64>; 4],
    pub average: Option<f64>,
    /// `None` while the term has no evaluations.
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRow {
    #[serde(rename = "courseId")]
    pub course_id: CourseSlug,
    #[serde(rename = "courseName")]
    pub course_name: String,
    pub terms: [TermCell; 3],
}

/// Full transcript for one student: per-course rows plus the overall
/// averages summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(rename = "studentDni")]
    pub student_dni: Dni,
    pub rows: Vec<TranscriptRow>,
    pub summary: AverageReport,
}

fn empty_cell() -> TermCell {
    TermCell {
        evaluations: [None; 4],
        average: None,
        passed: None,
    }
}

/// Build the transcript grid over the grades visible in `scope`.
///
/// Only courses with at least one qualifying grade appear; rows come out in
/// slug order so output is deterministic.
pub fn transcript<'a>(
    student: &Dni,
    grades: &'a [GradeEntry],
    courses: impl IntoIterator<Item = &'a Course>,
    scope: &CourseScope,
) -> Transcript {
    let names: BTreeMap<&CourseSlug, &str> = courses
        .into_iter()
        .map(|c| (&c.slug, c.name.as_str()))
        .collect();

    let mut grid: BTreeMap<CourseSlug, [Vec<(u8, f64)>; 3]> = BTreeMap::new();
    for g in grades {
        if &g.student_dni != student || !scope.allows(&g.course_id) {
            continue;
        }
        if g.evaluation == 0 || g.evaluation > EVALUATIONS_PER_TERM {
            continue;
        }
        let per_course = grid.entry(g.course_id.clone()).or_default();
        per_course[g.term.index()].push((g.evaluation, g.score));
    }

    let rows = grid
        .into_iter()
        .map(|(slug, terms)| {
            let cells = Term::ALL.map(|term| {
                let scored = &terms[term.index()];
                if scored.is_empty() {
                    return empty_cell();
                }

                let mut evaluations = [None; 4];
                for (evaluation, score) in scored {
                    evaluations[(*evaluation - 1) as usize] = Some(*score);
                }
                let avg =
                    round2(scored.iter().map(|(_, s)| s).sum::<f64>() / scored.len() as f64);
                TermCell {
                    evaluations,
                    average: Some(avg),
                    passed: Some(avg >= PASS_THRESHOLD),
                }
            });

            let course_name = names
                .get(&slug)
                .map(|n| n.to_string())
                .unwrap_or_else(|| slug.to_string());

            TranscriptRow {
                course_id: slug,
                course_name,
                terms: cells,
            }
        })
        .collect();

    Transcript {
        student_dni: student.clone(),
        rows,
        summary: compute_averages(student, grades, scope),
    }
}
