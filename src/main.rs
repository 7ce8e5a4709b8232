mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::QuestionLensApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Question Lens – Exam Question Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(QuestionLensApp::new(&config)))),
    )
}
