use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, VLine};

use crate::data::model::{LongTable, MetricType, Technique};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric chart (central panel)
// ---------------------------------------------------------------------------

/// Render the line chart for the active metric tab.  One line per
/// (technique, distribution): colour encodes the technique, dash style the
/// distribution — the caller guarantees `filtered` is non-empty.
pub fn metric_chart(ui: &mut Ui, state: &AppState, filtered: &LongTable) {
    // Group observations into series, keyed so the legend is stable.
    let mut series: BTreeMap<(Technique, String), Vec<[f64; 2]>> = BTreeMap::new();
    for row in &filtered.rows {
        let y = if state.display.log_scale {
            // log10 of a non-positive measurement has no meaning; skip the
            // point rather than plotting an artifact.
            if row.value <= 0.0 {
                continue;
            }
            row.value.log10()
        } else {
            row.value
        };
        series
            .entry((row.technique, row.distribution.clone()))
            .or_default()
            .push([row.load_factor, y]);
    }

    let distributions: Vec<String> = filtered.distributions().into_iter().collect();

    let y_label = match (state.active_metric, state.display.log_scale) {
        (MetricType::Probes, false) => "Average Probes".to_string(),
        (MetricType::InsertionTime, false) => "CPU Time (ms)".to_string(),
        (m, true) => format!("log10({m})"),
    };

    // The vertical marker for the emphasized insertion step, resolved to
    // that step's load factor.
    let highlight_x = state.display.highlight_key.and_then(|k| {
        filtered
            .rows
            .iter()
            .find(|r| r.key_index == Some(k))
            .map(|r| r.load_factor)
    });

    Plot::new("metric_chart")
        .legend(Legend::default())
        .x_axis_label("Load Factor (α)")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ((technique, distribution), points) in &series {
                let style = dash_style(&distributions, distribution);
                let name = format!("{technique} – {distribution}");
                let points: PlotPoints = points.iter().copied().collect();

                let line = Line::new(points)
                    .name(&name)
                    .color(state.colors.color_for(*technique))
                    .style(style)
                    .width(1.5);

                plot_ui.line(line);
            }

            if let Some(x) = highlight_x {
                let key = state.display.highlight_key.unwrap_or_default();
                plot_ui.vline(
                    VLine::new(x)
                        .name(format!("key #{key}"))
                        .style(LineStyle::Dashed { length: 6.0 }),
                );
            }
        });
}

/// Distributions share technique colours, so they are told apart by dash
/// pattern instead.
fn dash_style(distributions: &[String], distribution: &str) -> LineStyle {
    let idx = distributions
        .iter()
        .position(|d| d == distribution)
        .unwrap_or(0);
    match idx % 3 {
        0 => LineStyle::Solid,
        1 => LineStyle::Dashed { length: 8.0 },
        _ => LineStyle::Dotted { spacing: 6.0 },
    }
}
