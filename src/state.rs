use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::Aggregates;
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::loader::load_file;
use crate::data::model::{Provocativeness, QuestionTable, QuestionType};
use crate::data::subject::SubjectMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Enriched dataset for this session (None until a file loads).
    /// Shared read-only; filter changes never touch it.
    pub table: Option<Arc<QuestionTable>>,

    /// Where `table` was loaded from.
    pub source: Option<PathBuf>,

    /// Subject lookup used when loading.
    pub subjects: SubjectMap,

    /// Current filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart inputs for `visible_indices` (cached).
    pub aggregates: Aggregates,

    /// Colour per question type.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SubjectMap::default())
    }
}

impl AppState {
    pub fn new(subjects: SubjectMap) -> Self {
        Self {
            table: None,
            source: None,
            subjects,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            aggregates: Aggregates::default(),
            color_map: ColorMap::for_question_types(),
            status_message: None,
        }
    }

    /// Load a dataset file and install it. Errors end up in `status_message`.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path, &self.subjects) {
            Ok(table) => {
                log::info!(
                    "Loaded {} questions from {} ({} subjects, {} question types)",
                    table.len(),
                    path.display(),
                    table.subjects.len(),
                    table.question_types.len()
                );
                if table.is_empty() {
                    log::warn!("{} contains no questions", path.display());
                }
                self.source = Some(path.to_path_buf());
                self.set_table(Arc::new(table));
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded table and select everything.
    pub fn set_table(&mut self, table: Arc<QuestionTable>) {
        self.filters = FilterState::all(&table);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and `aggregates` after a filter change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices = filtered_indices(table, &self.filters);
        self.aggregates = Aggregates::compute(table, &self.visible_indices);
        log::debug!(
            "Filter matched {} of {} questions",
            self.visible_indices.len(),
            table.len()
        );
    }

    /// Toggle a subject display name in the subject filter.
    pub fn toggle_subject(&mut self, subject: &str) {
        let selected = &mut self.filters.subjects;
        if !selected.remove(subject) {
            selected.insert(subject.to_string());
        }
        self.refilter();
    }

    /// Toggle a question type in the type filter.
    pub fn toggle_question_type(&mut self, question_type: QuestionType) {
        let selected = &mut self.filters.question_types;
        if !selected.remove(&question_type) {
            selected.insert(question_type);
        }
        self.refilter();
    }

    pub fn select_all_subjects(&mut self) {
        if let Some(table) = &self.table {
            self.filters.subjects = table.subjects.clone();
            self.refilter();
        }
    }

    pub fn select_no_subjects(&mut self) {
        self.filters.subjects.clear();
        self.refilter();
    }

    pub fn select_all_question_types(&mut self) {
        if let Some(table) = &self.table {
            self.filters.question_types = table.question_types.clone();
            self.refilter();
        }
    }

    pub fn select_no_question_types(&mut self) {
        self.filters.question_types.clear();
        self.refilter();
    }

    /// Set the lower bound; the upper bound follows if it would fall below.
    pub fn set_min_provocativeness(&mut self, min: u8) {
        let min = min.clamp(Provocativeness::MIN, Provocativeness::MAX);
        self.filters.min_provocativeness = min;
        self.filters.max_provocativeness = self.filters.max_provocativeness.max(min);
        self.refilter();
    }

    /// Set the upper bound; the lower bound follows if it would rise above.
    pub fn set_max_provocativeness(&mut self, max: u8) {
        let max = max.clamp(Provocativeness::MIN, Provocativeness::MAX);
        self.filters.max_provocativeness = max;
        self.filters.min_provocativeness = self.filters.min_provocativeness.min(max);
        self.refilter();
    }
}
