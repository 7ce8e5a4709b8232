use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::SubjectTypeKey;
use crate::data::model::{Provocativeness, QuestionType};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
/// Share of a unit slot covered by one group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the three charts for the current filtered view.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a question dataset to begin  (File → Open…)");
        });
        return;
    }

    let agg = &state.aggregates;
    let counts: BTreeMap<SubjectTypeKey, f64> = agg
        .counts_by_subject_type
        .iter()
        .map(|(key, &n)| (key.clone(), n as f64))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if agg.is_empty() {
                ui.label(
                    RichText::new("No questions match the current filters.")
                        .italics()
                        .weak(),
                );
            } else {
                ui.label(format!("{} questions in view", agg.rows));
            }
            ui.add_space(8.0);

            ui.heading("Questions by subject and type");
            grouped_plot(ui, "count_by_subject", "Count", &counts, &state.color_map);
            ui.add_space(12.0);

            ui.heading("Provocativeness by question type");
            provocativeness_plot(ui, state);
            ui.add_space(12.0);

            ui.heading("Mean provocativeness by subject and type");
            grouped_plot(
                ui,
                "mean_by_subject",
                "Mean provocativeness",
                &agg.mean_by_subject_type,
                &state.color_map,
            );
        });
}

// ---------------------------------------------------------------------------
// Grouped bars: one group per subject, one bar per question type
// ---------------------------------------------------------------------------

/// Horizontal offset of series `j` of `n` inside a group centred on 0.
pub fn grouped_offset(j: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (j as f64 - (n as f64 - 1.0) / 2.0) * bar_width(n)
}

pub fn bar_width(n: usize) -> f64 {
    GROUP_WIDTH / n.max(1) as f64
}

/// Label for an x grid mark when categories sit at 0, 1, 2, ...
pub fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn grouped_plot(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    values: &BTreeMap<SubjectTypeKey, f64>,
    colors: &ColorMap,
) {
    let subjects: Vec<String> = values
        .keys()
        .map(|(subject, _)| subject.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let types: Vec<QuestionType> = values
        .keys()
        .map(|(_, qt)| *qt)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let width = bar_width(types.len());
    let charts: Vec<BarChart> = types
        .iter()
        .enumerate()
        .map(|(j, &qt)| {
            let bars: Vec<Bar> = subjects
                .iter()
                .enumerate()
                .filter_map(|(i, subject)| {
                    let value = values.get(&(subject.clone(), qt))?;
                    let x = i as f64 + grouped_offset(j, types.len());
                    Some(Bar::new(x, *value).width(width).name(subject))
                })
                .collect();
            BarChart::new(bars)
                .name(qt.as_str())
                .color(colors.color_for(qt))
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Subject")
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| category_label(&subjects, mark.value))
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Stacked bars: one column per score, stacked by question type
// ---------------------------------------------------------------------------

fn provocativeness_plot(ui: &mut Ui, state: &AppState) {
    let counts = &state.aggregates.counts_by_provocativeness_type;
    let types: BTreeSet<QuestionType> = counts.keys().map(|(_, qt)| *qt).collect();

    let mut charts: Vec<BarChart> = Vec::with_capacity(types.len());
    for qt in types {
        // Stacking pairs bars by position, so every series has one bar per score.
        let bars: Vec<Bar> = Provocativeness::all()
            .map(|score| {
                let n = counts.get(&(score, qt)).copied().unwrap_or(0);
                Bar::new(f64::from(score.get()), n as f64)
                    .width(GROUP_WIDTH)
                    .name(format!("score {score}"))
            })
            .collect();
        let chart = {
            let below: Vec<&BarChart> = charts.iter().collect();
            BarChart::new(bars)
                .name(qt.as_str())
                .color(state.color_map.color_for(qt))
                .stack_on(&below)
        };
        charts.push(chart);
    }

    Plot::new("count_by_provocativeness")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Provocativeness")
        .y_axis_label("Count")
        .x_axis_formatter(|mark, _range| {
            let score = mark.value.round();
            if (mark.value - score).abs() < 1e-6 {
                Provocativeness::new(score as u8)
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            } else {
                String::new()
            }
        })
        .include_x(f64::from(Provocativeness::MIN) - 0.5)
        .include_x(f64::from(Provocativeness::MAX) + 0.5)
        .include_y(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
