use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuestionLensApp {
    pub state: AppState,
}

impl QuestionLensApp {
    /// Build the app and load the configured dataset once for the session.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::new(config.subjects.clone());
        if config.dataset_path.exists() {
            state.load_path(&config.dataset_path);
        } else {
            log::warn!(
                "Dataset {} not found; use File → Open… to pick one",
                config.dataset_path.display()
            );
            state.status_message = Some(format!(
                "Dataset not found: {}",
                config.dataset_path.display()
            ));
        }
        Self { state }
    }
}

impl eframe::App for QuestionLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &self.state);
        });
    }
}
