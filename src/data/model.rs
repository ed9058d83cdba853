use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Technique / MetricType – the two categorical axes of an observation
// ---------------------------------------------------------------------------

/// A collision-resolution technique measured by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technique {
    Chaining,
    LinearProbing,
    QuadraticProbing,
    DoubleHashing,
}

impl Technique {
    pub const ALL: [Technique; 4] = [
        Technique::Chaining,
        Technique::LinearProbing,
        Technique::QuadraticProbing,
        Technique::DoubleHashing,
    ];
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Technique::Chaining => "Chaining",
            Technique::LinearProbing => "Linear Probing",
            Technique::QuadraticProbing => "Quadratic Probing",
            Technique::DoubleHashing => "Double Hashing",
        };
        write!(f, "{name}")
    }
}

/// Which quantity a long-form row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricType {
    /// Average (or cumulative) slot accesses per insertion.
    Probes,
    /// Measured insertion CPU time in milliseconds.
    InsertionTime,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Probes => write!(f, "Average Probes"),
            MetricType::InsertionTime => write!(f, "Insertion Time (ms)"),
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationRecord – one wide row of the source CSV
// ---------------------------------------------------------------------------

/// One row of the simulation output, after schema assignment and coercion.
///
/// `probes` and `times` hold one slot per technique the active schema
/// defines for that group, in schema column order.  A `None` metric value
/// means the cell was empty in the file: a missing measurement, which is
/// not the same thing as a measured zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub distribution: String,
    /// Large-N vs small-N run label; only some schema versions carry it.
    pub scale: Option<String>,
    /// 1-based insertion step within a run; only some schema versions carry it.
    pub key_index: Option<u32>,
    pub load_factor: f64,
    pub probes: Vec<(Technique, Option<f64>)>,
    pub times: Vec<(Technique, Option<f64>)>,
}

// ---------------------------------------------------------------------------
// WideTable – the loaded dataset, immutable after load
// ---------------------------------------------------------------------------

/// The full parsed file: one [`SimulationRecord`] per data line.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub records: Vec<SimulationRecord>,
}

impl WideTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LongObservation / LongTable – the reshaped, plottable form
// ---------------------------------------------------------------------------

/// One observation of the long (melted) table: a single metric value tagged
/// with its full context.
#[derive(Debug, Clone, PartialEq)]
pub struct LongObservation {
    pub distribution: String,
    pub scale: Option<String>,
    pub key_index: Option<u32>,
    pub load_factor: f64,
    pub technique: Technique,
    pub metric_type: MetricType,
    pub value: f64,
}

/// The reshaped dataset.  Derived once from a [`WideTable`] and never
/// mutated; filtering produces new `LongTable` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    pub rows: Vec<LongObservation>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct distribution labels, sorted.
    pub fn distributions(&self) -> BTreeSet<String> {
        self.rows.iter().map(|r| r.distribution.clone()).collect()
    }

    /// Distinct scale labels, sorted.  Empty when the schema has no scale.
    pub fn scales(&self) -> BTreeSet<String> {
        self.rows.iter().filter_map(|r| r.scale.clone()).collect()
    }

    /// Distinct techniques present.
    pub fn techniques(&self) -> BTreeSet<Technique> {
        self.rows.iter().map(|r| r.technique).collect()
    }

    /// Largest load factor present, or `None` on an empty table.  Callers
    /// must not assume a maximum exists after filtering.
    pub fn max_load_factor(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|r| r.load_factor)
            .max_by(f64::total_cmp)
    }

    /// Largest metric value present, or `None` on an empty table.
    pub fn max_value(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.value).max_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(dist: &str, lf: f64, value: f64) -> LongObservation {
        LongObservation {
            distribution: dist.to_string(),
            scale: None,
            key_index: None,
            load_factor: lf,
            technique: Technique::Chaining,
            metric_type: MetricType::Probes,
            value,
        }
    }

    #[test]
    fn empty_table_has_no_maximum() {
        let t = LongTable::default();
        assert_eq!(t.max_load_factor(), None);
        assert_eq!(t.max_value(), None);
    }

    #[test]
    fn maxima_over_populated_table() {
        let t = LongTable {
            rows: vec![obs("Uniform", 0.25, 1.2), obs("Skewed", 0.75, 3.0)],
        };
        assert_eq!(t.max_load_factor(), Some(0.75));
        assert_eq!(t.max_value(), Some(3.0));
        assert_eq!(t.distributions().len(), 2);
        assert!(t.scales().is_empty());
    }
}
