use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::enrich::enrich;
use super::model::QuestionTable;
use super::subject::SubjectMap;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and enrich a question dataset from a JSON file.
///
/// Expected schema (records-oriented, as written by `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "subject": "inf", "solution": "{'text': 'Впишите ответ'}", ... },
///   { "subject": "fr",  "solution": null, ... }
/// ]
/// ```
///
/// Any failure aborts the whole load; there is no partial result.
pub fn load_file(path: &Path, subjects: &SubjectMap) -> Result<QuestionTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    parse_records(&text, subjects)
}

/// Only the columns the dashboard uses; other fields are ignored.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    subject: String,
    #[serde(default)]
    solution: Option<JsonValue>,
}

/// Parse and enrich JSON text holding an array of question records.
pub fn parse_records(text: &str, subjects: &SubjectMap) -> Result<QuestionTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if !row.is_object() {
            bail!("Row {i} is not a JSON object");
        }
        let raw = RawQuestion::deserialize(row)
            .with_context(|| format!("Row {i}: invalid question record"))?;
        let record = enrich(&raw.subject, raw.solution.as_ref(), subjects)
            .with_context(|| format!("Row {i}: extracting solution text"))?;
        records.push(record);
    }

    Ok(QuestionTable::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::QuestionType;

    const SAMPLE: &str = r#"[
        {"id": 1, "subject": "inf", "solution": "{'text': 'Выберите один правильный ответ'}"},
        {"id": 2, "subject": "fr", "solution": "{'text': 'Установи соответствие между словами'}"},
        {"id": 3, "subject": "xyz", "solution": null},
        {"id": 4, "subject": "inf"}
    ]"#;

    #[test]
    fn parses_and_enriches_records() {
        let table = parse_records(SAMPLE, &SubjectMap::default()).unwrap();
        assert_eq!(table.len(), 4);

        let types: Vec<QuestionType> = table.records.iter().map(|r| r.question_type).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::SingleSelect,
                QuestionType::Matching,
                QuestionType::Undefined,
                QuestionType::Undefined,
            ]
        );
        assert_eq!(table.records[0].subject_full, "Информатика");
        assert_eq!(table.records[1].subject_full, "Французский язык");
        assert_eq!(table.records[2].subject_full, "xyz");
        assert_eq!(table.records[2].solution_text, "");
        assert_eq!(table.subjects.len(), 3);
    }

    #[test]
    fn invariants_hold_for_every_record() {
        let table = parse_records(SAMPLE, &SubjectMap::default()).unwrap();
        for rec in &table.records {
            assert!(QuestionType::ALL.contains(&rec.question_type));
            assert!((1..=3).contains(&rec.provocativeness.get()));
            assert_eq!(rec.provocativeness, rec.question_type.provocativeness());
            assert!(!rec.subject_full.is_empty());
        }
    }

    #[test]
    fn empty_array_gives_empty_table() {
        let table = parse_records("[]", &SubjectMap::default()).unwrap();
        assert!(table.is_empty());
        assert!(table.subjects.is_empty());
    }

    #[test]
    fn malformed_input_is_rejected() {
        let map = SubjectMap::default();
        assert!(parse_records("not json", &map).is_err());
        assert!(parse_records(r#"{"subject": "inf"}"#, &map).is_err());
        assert!(parse_records(r#"[1, 2]"#, &map).is_err());
        assert!(parse_records(r#"[{"solution": null}]"#, &map).is_err());

        let err = parse_records(
            r#"[{"subject": "inf", "solution": null}, {"subject": "inf", "solution": "{'text': "}]"#,
            &map,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"), "{err:#}");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = load_file(file.path(), &SubjectMap::default()).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.json"), &SubjectMap::default()).unwrap_err();
        assert!(format!("{err:#}").contains("reading dataset"));
    }
}
