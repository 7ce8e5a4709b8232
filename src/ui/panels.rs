use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::{Provocativeness, QuestionTable};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // The Arc lets the widgets read the table while the state is mutated.
    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            subject_filter(ui, state, &table);
            type_filter(ui, state, &table);
            ui.separator();
            provocativeness_filter(ui, state);
        });
}

fn subject_filter(ui: &mut Ui, state: &mut AppState, table: &QuestionTable) {
    let header = format!(
        "Subjects  ({}/{})",
        state.filters.subjects.len(),
        table.subjects.len()
    );

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("subjects")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_subjects();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_subjects();
                }
            });

            for subject in &table.subjects {
                let mut checked = state.filters.subjects.contains(subject);
                if ui.checkbox(&mut checked, subject.as_str()).changed() {
                    state.toggle_subject(subject);
                }
            }
        });
}

fn type_filter(ui: &mut Ui, state: &mut AppState, table: &QuestionTable) {
    let header = format!(
        "Question types  ({}/{})",
        state.filters.question_types.len(),
        table.question_types.len()
    );

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("question_types")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_question_types();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_question_types();
                }
            });

            for &qt in &table.question_types {
                let mut checked = state.filters.question_types.contains(&qt);
                // label in the series colour doubles as a legend
                let text = RichText::new(qt.as_str()).color(state.color_map.color_for(qt));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_question_type(qt);
                }
            }
        });
}

fn provocativeness_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Provocativeness");

    let range = Provocativeness::MIN..=Provocativeness::MAX;

    let mut min = state.filters.min_provocativeness;
    if ui
        .add(Slider::new(&mut min, range.clone()).text("min"))
        .changed()
    {
        state.set_min_provocativeness(min);
    }

    let mut max = state.filters.max_provocativeness;
    if ui.add(Slider::new(&mut max, range).text("max")).changed() {
        state.set_max_provocativeness(max);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} questions loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(path) = &state.source {
            ui.separator();
            ui.label(RichText::new(path.display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open question dataset")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
