use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// QuestionType – the interaction pattern inferred from a question's text
// ---------------------------------------------------------------------------

/// Closed set of question types. Variant order follows rule priority, which
/// also makes it the sort order used for legends and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionType {
    Matching,
    Sequencing,
    MultiSelect,
    SingleSelect,
    OpenEnded,
    Undefined,
}

impl QuestionType {
    /// Every variant, in priority order.
    pub const ALL: [QuestionType; 6] = [
        QuestionType::Matching,
        QuestionType::Sequencing,
        QuestionType::MultiSelect,
        QuestionType::SingleSelect,
        QuestionType::OpenEnded,
        QuestionType::Undefined,
    ];

    /// Stable label used in the UI and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Matching => "matching",
            QuestionType::Sequencing => "sequencing",
            QuestionType::MultiSelect => "multi-select",
            QuestionType::SingleSelect => "single-select",
            QuestionType::OpenEnded => "open-ended",
            QuestionType::Undefined => "undefined",
        }
    }

    /// Heuristic difficulty score, a pure function of the type.
    pub fn provocativeness(self) -> Provocativeness {
        match self {
            QuestionType::OpenEnded => Provocativeness::HIGH,
            QuestionType::Matching | QuestionType::Sequencing => Provocativeness::MEDIUM,
            QuestionType::SingleSelect | QuestionType::MultiSelect => Provocativeness::LOW,
            QuestionType::Undefined => Provocativeness::LOW,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Provocativeness – integer score constrained to 1..=3
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Provocativeness(u8);

impl Provocativeness {
    pub const LOW: Provocativeness = Provocativeness(1);
    pub const MEDIUM: Provocativeness = Provocativeness(2);
    pub const HIGH: Provocativeness = Provocativeness(3);

    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    /// Returns `None` for scores outside 1..=3.
    pub fn new(score: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&score)
            .then_some(Provocativeness(score))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid scores in ascending order.
    pub fn all() -> impl Iterator<Item = Provocativeness> {
        (Self::MIN..=Self::MAX).map(Provocativeness)
    }
}

impl fmt::Display for Provocativeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// QuestionRecord – one enriched row of the dataset
// ---------------------------------------------------------------------------

/// A single exam question after enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    /// Short subject code as found in the source (`inf`, `fr`, ...).
    pub subject: String,
    /// Free text pulled out of the `solution` structure; empty when absent.
    pub solution_text: String,
    pub question_type: QuestionType,
    pub provocativeness: Provocativeness,
    /// Display name for the subject, or the raw code when unmapped.
    pub subject_full: String,
}

// ---------------------------------------------------------------------------
// QuestionTable – the complete enriched dataset
// ---------------------------------------------------------------------------

/// The enriched dataset with pre-computed distinct values for the filters.
/// Built once per session and shared read-only behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct QuestionTable {
    pub records: Vec<QuestionRecord>,
    /// Sorted distinct subject display names.
    pub subjects: BTreeSet<String>,
    /// Distinct question types actually present.
    pub question_types: BTreeSet<QuestionType>,
}

impl QuestionTable {
    /// Build the distinct-value indices from enriched records.
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let subjects = records.iter().map(|r| r.subject_full.clone()).collect();
        let question_types = records.iter().map(|r| r.question_type).collect();
        QuestionTable {
            records,
            subjects,
            question_types,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
