use serde_json::Value as JsonValue;
use thiserror::Error;

use super::literal::{self, LiteralError};
use super::model::{QuestionRecord, QuestionType};
use super::subject::SubjectMap;

// ---------------------------------------------------------------------------
// Question-type rules
// ---------------------------------------------------------------------------

/// One classification rule: the label applies when the lower-cased text
/// contains any of the needles.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub needles: &'static [&'static str],
    pub label: QuestionType,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.needles.iter().any(|needle| lowered.contains(needle))
    }
}

/// Ordered rule table; the first matching rule wins. Text matching none of
/// them is [`QuestionType::Undefined`].
pub const RULES: &[Rule] = &[
    Rule {
        needles: &["установи соответствие"],
        label: QuestionType::Matching,
    },
    Rule {
        needles: &["расположи", "укажи последовательность"],
        label: QuestionType::Sequencing,
    },
    Rule {
        needles: &["выберите несколько", "много вариантов"],
        label: QuestionType::MultiSelect,
    },
    Rule {
        needles: &["выберите один", "один вариант"],
        label: QuestionType::SingleSelect,
    },
    Rule {
        needles: &["впишите", "ответ"],
        label: QuestionType::OpenEnded,
    },
];

/// Classify a question by case-insensitive substring match against [`RULES`].
pub fn infer_question_type(text: &str) -> QuestionType {
    classify_with(RULES, text)
}

/// Same as [`infer_question_type`] but with an explicit rule table.
pub fn classify_with(rules: &[Rule], text: &str) -> QuestionType {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.label)
        .unwrap_or(QuestionType::Undefined)
}

// ---------------------------------------------------------------------------
// Solution text extraction
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SolutionError {
    #[error("solution is not a valid literal: {0}")]
    Literal(#[from] LiteralError),
    #[error("solution is not a mapping (got {0})")]
    NotAMapping(&'static str),
    #[error("solution has no 'text' field")]
    MissingText,
    #[error("solution 'text' is not a string (got {0})")]
    TextNotString(&'static str),
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Pull the free text out of a record's `solution` cell.
///
/// * absent or `null` → empty string
/// * string → parsed as a Python/JSON literal, then its `text` key
/// * object → its `text` key
pub fn extract_solution_text(solution: Option<&JsonValue>) -> Result<String, SolutionError> {
    let parsed;
    let structure = match solution {
        None | Some(JsonValue::Null) => return Ok(String::new()),
        Some(JsonValue::String(raw)) => {
            parsed = literal::parse(raw)?;
            &parsed
        }
        Some(other) => other,
    };

    let fields = structure
        .as_object()
        .ok_or(SolutionError::NotAMapping(kind(structure)))?;
    match fields.get("text") {
        Some(JsonValue::String(text)) => Ok(text.clone()),
        Some(other) => Err(SolutionError::TextNotString(kind(other))),
        None => Err(SolutionError::MissingText),
    }
}

// ---------------------------------------------------------------------------
// Record enrichment
// ---------------------------------------------------------------------------

/// Derive every computed column for one raw row.
pub fn enrich(
    subject: &str,
    solution: Option<&JsonValue>,
    subjects: &SubjectMap,
) -> Result<QuestionRecord, SolutionError> {
    let solution_text = extract_solution_text(solution)?;
    let question_type = infer_question_type(&solution_text);
    Ok(QuestionRecord {
        subject: subject.to_string(),
        subject_full: subjects.display_name(subject),
        provocativeness: question_type.provocativeness(),
        question_type,
        solution_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_select_beats_open_ended() {
        // "ответ" would match open-ended, but single-select has priority
        let qt = infer_question_type("Выберите один правильный ответ");
        assert_eq!(qt, QuestionType::SingleSelect);
        assert_eq!(qt.provocativeness().get(), 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let qt = infer_question_type("Установи соответствие между терминами и определениями");
        assert_eq!(qt, QuestionType::Matching);
        assert_eq!(qt.provocativeness().get(), 2);

        assert_eq!(
            infer_question_type("УСТАНОВИ СООТВЕТСТВИЕ"),
            QuestionType::Matching
        );
    }

    #[test]
    fn every_rule_fires() {
        let cases = [
            ("Расположи события по порядку", QuestionType::Sequencing),
            ("Укажи последовательность шагов", QuestionType::Sequencing),
            ("Выберите несколько вариантов", QuestionType::MultiSelect),
            ("Здесь много вариантов", QuestionType::MultiSelect),
            ("Возможен один вариант", QuestionType::SingleSelect),
            ("Впишите слово", QuestionType::OpenEnded),
            ("Запишите ответ цифрами", QuestionType::OpenEnded),
            ("Solve 2 + 2", QuestionType::Undefined),
            ("", QuestionType::Undefined),
        ];
        for (text, expected) in cases {
            assert_eq!(infer_question_type(text), expected, "text: {text}");
        }
    }

    #[test]
    fn earlier_rule_wins_when_several_match() {
        let text = "Установи соответствие, затем расположи и впишите ответ";
        assert_eq!(infer_question_type(text), QuestionType::Matching);

        let text = "Расположи и выберите несколько";
        assert_eq!(infer_question_type(text), QuestionType::Sequencing);
    }

    #[test]
    fn custom_rule_table_is_respected() {
        let rules = [Rule {
            needles: &["ответ"],
            label: QuestionType::OpenEnded,
        }];
        // without the single-select rule in front, "ответ" wins
        assert_eq!(
            classify_with(&rules, "Выберите один правильный ответ"),
            QuestionType::OpenEnded
        );
        assert_eq!(classify_with(&[], "что угодно"), QuestionType::Undefined);
    }

    #[test]
    fn null_solution_is_empty_text() {
        assert_eq!(extract_solution_text(None).unwrap(), "");
        assert_eq!(extract_solution_text(Some(&JsonValue::Null)).unwrap(), "");

        let rec = enrich("inf", Some(&JsonValue::Null), &SubjectMap::default()).unwrap();
        assert_eq!(rec.solution_text, "");
        assert_eq!(rec.question_type, QuestionType::Undefined);
        assert_eq!(rec.provocativeness.get(), 1);
        assert_eq!(rec.subject_full, "Информатика");
    }

    #[test]
    fn literal_string_solution() {
        let cell = json!("{'text': 'Впишите пропущенное слово', 'images': []}");
        assert_eq!(
            extract_solution_text(Some(&cell)).unwrap(),
            "Впишите пропущенное слово"
        );
    }

    #[test]
    fn object_solution() {
        let cell = json!({"text": "Расположи числа"});
        let rec = enrich("xyz", Some(&cell), &SubjectMap::default()).unwrap();
        assert_eq!(rec.question_type, QuestionType::Sequencing);
        assert_eq!(rec.subject_full, "xyz");
    }

    #[test]
    fn malformed_solutions_fail() {
        assert!(matches!(
            extract_solution_text(Some(&json!("{'text': "))),
            Err(SolutionError::Literal(_))
        ));
        assert!(matches!(
            extract_solution_text(Some(&json!("{'body': 'x'}"))),
            Err(SolutionError::MissingText)
        ));
        assert!(matches!(
            extract_solution_text(Some(&json!("['text']"))),
            Err(SolutionError::NotAMapping("array"))
        ));
        assert!(matches!(
            extract_solution_text(Some(&json!({"text": 5}))),
            Err(SolutionError::TextNotString("number"))
        ));
        assert!(matches!(
            extract_solution_text(Some(&json!(42))),
            Err(SolutionError::NotAMapping("number"))
        ));
    }
}
