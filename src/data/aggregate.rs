use std::collections::BTreeMap;

use super::model::{Provocativeness, QuestionTable, QuestionType};

/// Key for the per-subject charts: (subject display name, question type).
pub type SubjectTypeKey = (String, QuestionType);

// ---------------------------------------------------------------------------
// Aggregations over a filtered view
// ---------------------------------------------------------------------------

/// Record count per (subject, question type).
pub fn counts_by_subject_type(
    table: &QuestionTable,
    indices: &[usize],
) -> BTreeMap<SubjectTypeKey, usize> {
    let mut counts = BTreeMap::new();
    for rec in indices.iter().filter_map(|&i| table.records.get(i)) {
        *counts
            .entry((rec.subject_full.clone(), rec.question_type))
            .or_insert(0) += 1;
    }
    counts
}

/// Record count per (provocativeness, question type).
pub fn counts_by_provocativeness_type(
    table: &QuestionTable,
    indices: &[usize],
) -> BTreeMap<(Provocativeness, QuestionType), usize> {
    let mut counts = BTreeMap::new();
    for rec in indices.iter().filter_map(|&i| table.records.get(i)) {
        *counts
            .entry((rec.provocativeness, rec.question_type))
            .or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of provocativeness per (subject, question type).
pub fn mean_provocativeness_by_subject_type(
    table: &QuestionTable,
    indices: &[usize],
) -> BTreeMap<SubjectTypeKey, f64> {
    let mut sums: BTreeMap<SubjectTypeKey, (u64, usize)> = BTreeMap::new();
    for rec in indices.iter().filter_map(|&i| table.records.get(i)) {
        let (sum, n) = sums
            .entry((rec.subject_full.clone(), rec.question_type))
            .or_insert((0, 0));
        *sum += u64::from(rec.provocativeness.get());
        *n += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum as f64 / n as f64))
        .collect()
}

/// Everything the three charts need, recomputed once per filter change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    /// Number of records the aggregates were computed from.
    pub rows: usize,
    pub counts_by_subject_type: BTreeMap<SubjectTypeKey, usize>,
    pub counts_by_provocativeness_type: BTreeMap<(Provocativeness, QuestionType), usize>,
    pub mean_by_subject_type: BTreeMap<SubjectTypeKey, f64>,
}

impl Aggregates {
    pub fn compute(table: &QuestionTable, indices: &[usize]) -> Self {
        Self {
            rows: indices.len(),
            counts_by_subject_type: counts_by_subject_type(table, indices),
            counts_by_provocativeness_type: counts_by_provocativeness_type(table, indices),
            mean_by_subject_type: mean_provocativeness_by_subject_type(table, indices),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
