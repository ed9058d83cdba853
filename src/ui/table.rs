use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{LongObservation, LongTable};

// ---------------------------------------------------------------------------
// Raw data table (shown when the user toggles "Show raw data")
// ---------------------------------------------------------------------------

/// Render the filtered long rows verbatim.  Sorting by (distribution, load
/// factor) is display-only; the underlying table keeps its pipeline order.
pub fn raw_table(ui: &mut Ui, filtered: &LongTable) {
    let mut rows: Vec<&LongObservation> = filtered.rows.iter().collect();
    rows.sort_by(|a, b| {
        a.distribution
            .cmp(&b.distribution)
            .then(a.load_factor.total_cmp(&b.load_factor))
    });

    let has_scale = rows.iter().any(|r| r.scale.is_some());
    let has_key_index = rows.iter().any(|r| r.key_index.is_some());

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0)); // Distribution
    if has_scale {
        builder = builder.column(Column::auto().at_least(60.0));
    }
    if has_key_index {
        builder = builder.column(Column::auto().at_least(70.0));
    }
    builder = builder
        .column(Column::auto().at_least(80.0)) // Load factor
        .column(Column::auto().at_least(110.0)) // Technique
        .column(Column::auto().at_least(110.0)) // Metric
        .column(Column::remainder()); // Value

    builder
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Distribution");
            });
            if has_scale {
                header.col(|ui| {
                    ui.strong("Scale");
                });
            }
            if has_key_index {
                header.col(|ui| {
                    ui.strong("Key Index");
                });
            }
            header.col(|ui| {
                ui.strong("Load Factor");
            });
            header.col(|ui| {
                ui.strong("Technique");
            });
            header.col(|ui| {
                ui.strong("Metric");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for obs in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&obs.distribution);
                    });
                    if has_scale {
                        row.col(|ui| {
                            ui.label(obs.scale.as_deref().unwrap_or("–"));
                        });
                    }
                    if has_key_index {
                        row.col(|ui| {
                            ui.label(
                                obs.key_index
                                    .map(|k| k.to_string())
                                    .unwrap_or_else(|| "–".to_string()),
                            );
                        });
                    }
                    row.col(|ui| {
                        ui.label(format!("{:.4}", obs.load_factor));
                    });
                    row.col(|ui| {
                        ui.label(obs.technique.to_string());
                    });
                    row.col(|ui| {
                        ui.label(obs.metric_type.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.6}", obs.value));
                    });
                });
            }
        });
}
