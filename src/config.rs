use std::path::PathBuf;

use crate::data::subject::SubjectMap;

/// File the dashboard opens on startup, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "final_ochka_dirty.json";

/// Compiled-in application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Dataset loaded at startup.
    pub dataset_path: PathBuf,
    /// Subject code → display name lookup applied during enrichment.
    pub subjects: SubjectMap,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            subjects: SubjectMap::default(),
            window_size: [1280.0, 900.0],
            min_window_size: [700.0, 500.0],
        }
    }
}
