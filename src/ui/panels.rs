use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{MetricType, Technique};
use crate::data::schema::SchemaVersion;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Canned per-distribution commentary
// ---------------------------------------------------------------------------

/// Static narrative shown under the chart.  Pure lookup-table content keyed
/// by distribution label; never consulted by the data pipeline.
const DISTRIBUTION_NOTES: &[(&str, &str)] = &[
    (
        "Uniform",
        "Uniformly random keys spread insertions evenly, so probe counts \
         stay close to the theoretical open-addressing curves.",
    ),
    (
        "Skewed",
        "Skewed keys cluster around hot slots; linear probing degrades \
         first as runs of occupied slots grow.",
    ),
    (
        "Worst_Case",
        "Adversarial keys collide maximally; compare how double hashing \
         breaks up the clusters that cripple linear probing.",
    ),
];

fn commentary(distribution: &str) -> Option<&'static str> {
    DISTRIBUTION_NOTES
        .iter()
        .find(|(label, _)| *label == distribution)
        .map(|(_, text)| *text)
}

// ---------------------------------------------------------------------------
// Left side panel – analysis filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis Filters");
    ui.separator();

    // Schema selection applies to the next File → Open.
    ui.strong("CSV schema");
    egui::ComboBox::from_id_salt("schema_version")
        .selected_text(state.schema_choice.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for version in SchemaVersion::ALL {
                ui.selectable_value(&mut state.schema_choice, version, version.to_string());
            }
        });
    ui.separator();

    let Some(data) = &state.data else {
        ui.label("No data loaded.");
        return;
    };

    let all_distributions: Vec<String> = data.long.distributions().into_iter().collect();
    let present_techniques = data.long.techniques();
    let scales: Vec<String> = data.long.scales().into_iter().collect();
    let has_scale = data.schema.has_scale();
    let has_key_index = data.schema.has_key_index();
    let lf_ceiling = data.long.max_load_factor().unwrap_or(1.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Distribution multi-select ----
            ui.strong("Distributions");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_distributions();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_distributions();
                }
            });
            for dist in &all_distributions {
                let mut checked = state.selected_distributions.contains(dist);
                if ui.checkbox(&mut checked, dist).changed() {
                    state.toggle_distribution(dist);
                }
            }
            ui.separator();

            // ---- Technique multi-select ----
            ui.strong("Techniques");
            for technique in Technique::ALL {
                if !present_techniques.contains(&technique) {
                    continue;
                }
                let mut checked = state.selected_techniques.contains(&technique);
                let text = RichText::new(technique.to_string())
                    .color(state.colors.color_for(technique));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_technique(technique);
                }
            }
            ui.separator();

            // ---- Scale single-select (schema-dependent) ----
            if has_scale {
                ui.strong("Scale");
                egui::ComboBox::from_id_salt("scale_select")
                    .selected_text(state.selected_scale.as_deref().unwrap_or("All"))
                    .show_ui(ui, |ui: &mut Ui| {
                        ui.selectable_value(&mut state.selected_scale, None, "All");
                        for scale in &scales {
                            ui.selectable_value(
                                &mut state.selected_scale,
                                Some(scale.clone()),
                                scale,
                            );
                        }
                    });
                ui.separator();
            }

            // ---- Max load factor ----
            ui.strong("Max Load Factor (α)");
            ui.add(
                egui::Slider::new(&mut state.max_load_factor, 0.05..=lf_ceiling.max(0.05))
                    .step_by(0.05)
                    .fixed_decimals(2),
            );
            ui.separator();

            // ---- Display options ----
            ui.strong("Display");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Y axis:");
                ui.selectable_value(&mut state.display.log_scale, false, "Linear");
                ui.selectable_value(&mut state.display.log_scale, true, "Logarithmic");
            });
            if has_key_index {
                let mut emphasize = state.display.highlight_key.is_some();
                if ui.checkbox(&mut emphasize, "Emphasize key index").changed() {
                    state.display.highlight_key = if emphasize { Some(1) } else { None };
                }
                if let Some(key) = &mut state.display.highlight_key {
                    ui.add(egui::DragValue::new(key).range(1..=u32::MAX).speed(1));
                }
            }
            ui.checkbox(&mut state.show_raw, "Show raw data table");
        });
}

// ---------------------------------------------------------------------------
// Central panel – metric tabs, chart, commentary, raw rows
// ---------------------------------------------------------------------------

/// Render the central panel: tab strip, chart (or placeholder), canned
/// commentary, and optionally the raw-data table.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.data.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a results CSV to begin  (File → Open…)");
        });
        return;
    }

    // ---- Metric tabs ----
    ui.horizontal(|ui: &mut Ui| {
        for metric in [MetricType::Probes, MetricType::InsertionTime] {
            ui.selectable_value(&mut state.active_metric, metric, metric.to_string());
        }
    });
    ui.separator();

    let filtered = state.filtered();
    if filtered.is_empty() {
        // A valid outcome of the filters, not an error.  Nothing numeric
        // is computed downstream of this point.
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data to display — select at least one distribution and technique.");
        });
        return;
    }

    let raw_height = if state.show_raw { 220.0 } else { 0.0 };
    let chart_height = (ui.available_height() - raw_height - 60.0).max(120.0);

    ui.allocate_ui(egui::vec2(ui.available_width(), chart_height), |ui: &mut Ui| {
        plot::metric_chart(ui, state, &filtered);
    });

    // ---- Commentary for the selected distributions ----
    for dist in &state.selected_distributions {
        if let Some(text) = commentary(dist) {
            ui.label(RichText::new(format!("{dist}: {text}")).weak().italics());
        }
    }

    // ---- Raw rows ----
    if state.show_raw {
        ui.separator();
        ui.strong("Raw Simulation Data");
        ScrollArea::vertical()
            .id_salt("raw_rows")
            .max_height(raw_height)
            .show(ui, |ui: &mut Ui| {
                table::raw_table(ui, &filtered);
            });
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
            if ui.button("Reload").clicked() {
                if let Some(path) = state.data.as_ref().map(|d| d.path.clone()) {
                    state.cache.invalidate(&path);
                    state.load_path(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(data) = &state.data {
            ui.label(format!(
                "{} rows loaded ({}), {} observations shown",
                data.wide.len(),
                data.schema,
                state.filtered().len()
            ));
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
        .set_title("Open simulation results")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
