use std::collections::BTreeSet;

use super::model::{Provocativeness, QuestionRecord, QuestionTable, QuestionType};

// ---------------------------------------------------------------------------
// Filter predicate: selected subjects, question types and score range
// ---------------------------------------------------------------------------

/// The three user-chosen criteria. A record passes when all three hold.
///
/// * subject display name is in `subjects` (empty set → nothing passes)
/// * question type is in `question_types` (empty set → nothing passes)
/// * provocativeness lies in `min_provocativeness..=max_provocativeness`
///   (an inverted range passes nothing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub subjects: BTreeSet<String>,
    pub question_types: BTreeSet<QuestionType>,
    pub min_provocativeness: u8,
    pub max_provocativeness: u8,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            subjects: BTreeSet::new(),
            question_types: BTreeSet::new(),
            min_provocativeness: Provocativeness::MIN,
            max_provocativeness: Provocativeness::MAX,
        }
    }
}

impl FilterState {
    /// Everything selected: all distinct subjects and types, full range.
    pub fn all(table: &QuestionTable) -> Self {
        Self {
            subjects: table.subjects.clone(),
            question_types: table.question_types.clone(),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &QuestionRecord) -> bool {
        let score = record.provocativeness.get();
        self.subjects.contains(&record.subject_full)
            && self.question_types.contains(&record.question_type)
            && self.min_provocativeness <= score
            && score <= self.max_provocativeness
    }
}

/// Return indices of records that pass the filter, in table order.
pub fn filtered_indices(table: &QuestionTable, filters: &FilterState) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enrich::enrich;
    use crate::data::subject::SubjectMap;
    use serde_json::json;

    fn table() -> QuestionTable {
        let map = SubjectMap::default();
        let rows = [
            ("inf", json!({"text": "Выберите один вариант"})),
            ("inf", json!({"text": "Впишите ответ"})),
            ("fr", json!({"text": "Установи соответствие"})),
            ("fr", json!({"text": "Выберите несколько"})),
            ("xyz", json!(null)),
            ("xyz", json!({"text": "Расположи по порядку"})),
        ];
        let records = rows
            .iter()
            .map(|(subject, solution)| enrich(subject, Some(solution), &map).unwrap())
            .collect();
        QuestionTable::from_records(records)
    }

    #[test]
    fn default_selection_passes_everything() {
        let table = table();
        let filters = FilterState::all(&table);
        assert_eq!(filtered_indices(&table, &filters), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_two_to_three_drops_low_scores() {
        let table = table();
        let filters = FilterState {
            min_provocativeness: 2,
            ..FilterState::all(&table)
        };
        let idx = filtered_indices(&table, &filters);
        assert_eq!(idx, vec![1, 2, 5]);
        for i in idx {
            let qt = table.records[i].question_type;
            assert!(!matches!(
                qt,
                QuestionType::SingleSelect | QuestionType::MultiSelect | QuestionType::Undefined
            ));
        }
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let table = table();
        let mut filters = FilterState::all(&table);
        filters.subjects = BTreeSet::from(["Французский язык".to_string()]);
        filters.question_types = BTreeSet::from([QuestionType::Matching, QuestionType::OpenEnded]);
        assert_eq!(filtered_indices(&table, &filters), vec![2]);
    }

    #[test]
    fn membership_is_exact_for_every_record() {
        let table = table();
        let mut filters = FilterState::all(&table);
        filters.subjects.remove("xyz");
        filters.question_types.remove(&QuestionType::OpenEnded);
        filters.max_provocativeness = 2;

        let idx = filtered_indices(&table, &filters);
        for (i, rec) in table.records.iter().enumerate() {
            let expected = rec.subject_full != "xyz"
                && rec.question_type != QuestionType::OpenEnded
                && rec.provocativeness.get() <= 2;
            assert_eq!(idx.contains(&i), expected, "record {i}");
        }
    }

    #[test]
    fn empty_selection_or_inverted_range_passes_nothing() {
        let table = table();

        let mut filters = FilterState::all(&table);
        filters.subjects.clear();
        assert!(filtered_indices(&table, &filters).is_empty());

        let mut filters = FilterState::all(&table);
        filters.question_types.clear();
        assert!(filtered_indices(&table, &filters).is_empty());

        let filters = FilterState {
            min_provocativeness: 3,
            max_provocativeness: 1,
            ..FilterState::all(&table)
        };
        assert!(filtered_indices(&table, &filters).is_empty());
    }
}
