use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::TechniqueColors;
use crate::data::cache::TableCache;
use crate::data::filter::{self, Query};
use crate::data::model::{LongTable, MetricType, Technique, WideTable};
use crate::data::reshape::to_long;
use crate::data::schema::SchemaVersion;

// ---------------------------------------------------------------------------
// Display options handed to the chart
// ---------------------------------------------------------------------------

/// Presentation choices that do not affect row membership.
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    /// Plot log10 of the metric value instead of the raw value.
    pub log_scale: bool,
    /// A single insertion step to emphasize (per-key schema only).
    pub highlight_key: Option<u32>,
}

/// A successfully loaded file together with its derived long table.
pub struct LoadedData {
    pub path: PathBuf,
    pub schema: SchemaVersion,
    pub wide: Arc<WideTable>,
    pub long: LongTable,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized file loads; survives across interactions.
    pub cache: TableCache,

    /// Loaded dataset (None until a file is opened).
    pub data: Option<LoadedData>,

    /// Schema version used for the next open.
    pub schema_choice: SchemaVersion,

    // ---- Sidebar filter selections ----
    pub selected_distributions: BTreeSet<String>,
    pub selected_techniques: BTreeSet<Technique>,
    pub selected_scale: Option<String>,
    pub max_load_factor: f64,

    /// Which metric tab is active.
    pub active_metric: MetricType,

    pub display: DisplayOptions,

    /// Whether the filtered rows are shown verbatim below the chart.
    pub show_raw: bool,

    pub colors: TechniqueColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: TableCache::new(),
            data: None,
            schema_choice: SchemaVersion::default(),
            selected_distributions: BTreeSet::new(),
            selected_techniques: BTreeSet::new(),
            selected_scale: None,
            max_load_factor: 1.0,
            active_metric: MetricType::Probes,
            display: DisplayOptions::default(),
            show_raw: false,
            colors: TechniqueColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load (or re-serve from cache) the file at `path` under the currently
    /// selected schema, derive the long table, and reset the filters to
    /// "everything selected".  On failure the previous dataset is kept and
    /// the error is surfaced as a status message.
    pub fn load_path(&mut self, path: &Path) {
        match self.cache.load(path, self.schema_choice) {
            Ok(wide) => {
                let long = to_long(&wide);
                log::info!(
                    "{}: {} wide rows → {} observations",
                    path.display(),
                    wide.len(),
                    long.len()
                );

                self.selected_distributions = long.distributions();
                self.selected_techniques = long.techniques();
                self.selected_scale = None;
                self.max_load_factor = long.max_load_factor().unwrap_or(1.0);
                self.display = DisplayOptions::default();

                self.data = Some(LoadedData {
                    path: path.to_path_buf(),
                    schema: self.schema_choice,
                    wide,
                    long,
                });
                self.status_message = None;
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// The sidebar selections expressed as predicates.
    pub fn current_query(&self) -> Query {
        Query {
            distributions: Some(self.selected_distributions.clone()),
            techniques: Some(self.selected_techniques.clone()),
            scale: self.selected_scale.clone(),
            max_load_factor: Some(self.max_load_factor),
            metric_type: Some(self.active_metric),
        }
    }

    /// Rows matching the current sidebar state for the active metric tab.
    /// Empty when nothing is loaded or nothing matches.
    pub fn filtered(&self) -> LongTable {
        match &self.data {
            Some(data) => filter::apply(&data.long, &self.current_query()),
            None => LongTable::default(),
        }
    }

    /// Toggle one distribution in the multi-select.
    pub fn toggle_distribution(&mut self, label: &str) {
        if !self.selected_distributions.remove(label) {
            self.selected_distributions.insert(label.to_string());
        }
    }

    /// Toggle one technique in the multi-select.
    pub fn toggle_technique(&mut self, technique: Technique) {
        if !self.selected_techniques.remove(&technique) {
            self.selected_techniques.insert(technique);
        }
    }

    pub fn select_all_distributions(&mut self) {
        if let Some(data) = &self.data {
            self.selected_distributions = data.long.distributions();
        }
    }

    pub fn select_no_distributions(&mut self) {
        self.selected_distributions.clear();
    }
}
