use std::fmt;

use super::model::Technique;

// ---------------------------------------------------------------------------
// Column – the role a CSV column plays, independent of its header text
// ---------------------------------------------------------------------------

/// One column of the simulation CSV.  The file's own header line is not
/// trusted (it drifted across simulator revisions), so every consumer works
/// from these explicit roles instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Distribution,
    Scale,
    KeyIndex,
    LoadFactor,
    Probes(Technique),
    TimeMs(Technique),
}

// ---------------------------------------------------------------------------
// SchemaVersion – the three CSV layouts the simulator has emitted
// ---------------------------------------------------------------------------

/// Enumerated CSV layouts, selected at configuration time.  The version is
/// never inferred from file contents; picking the wrong one is reported as
/// a schema mismatch, not silently tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVersion {
    /// Original layout: per-load-factor summary rows, no timing column for
    /// chaining.
    #[default]
    V1,
    /// V1 plus a `Scale` column distinguishing large-N from small-N runs.
    V2,
    /// Per-key layout: leading `Key_Index`, and timing columns for all four
    /// techniques including chaining.
    V3,
}

use Column::*;
use Technique::*;

const V1_COLUMNS: &[Column] = &[
    Distribution,
    LoadFactor,
    Probes(Chaining),
    Probes(LinearProbing),
    Probes(QuadraticProbing),
    Probes(DoubleHashing),
    TimeMs(LinearProbing),
    TimeMs(QuadraticProbing),
    TimeMs(DoubleHashing),
];

const V2_COLUMNS: &[Column] = &[
    Distribution,
    Scale,
    LoadFactor,
    Probes(Chaining),
    Probes(LinearProbing),
    Probes(QuadraticProbing),
    Probes(DoubleHashing),
    TimeMs(LinearProbing),
    TimeMs(QuadraticProbing),
    TimeMs(DoubleHashing),
];

const V3_COLUMNS: &[Column] = &[
    KeyIndex,
    LoadFactor,
    Distribution,
    Probes(Chaining),
    Probes(LinearProbing),
    Probes(QuadraticProbing),
    Probes(DoubleHashing),
    TimeMs(Chaining),
    TimeMs(LinearProbing),
    TimeMs(QuadraticProbing),
    TimeMs(DoubleHashing),
];

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 3] =
        [SchemaVersion::V1, SchemaVersion::V2, SchemaVersion::V3];

    /// Column roles in file order.
    pub fn columns(self) -> &'static [Column] {
        match self {
            SchemaVersion::V1 => V1_COLUMNS,
            SchemaVersion::V2 => V2_COLUMNS,
            SchemaVersion::V3 => V3_COLUMNS,
        }
    }

    pub fn has_scale(self) -> bool {
        self.columns().contains(&Scale)
    }

    pub fn has_key_index(self) -> bool {
        self.columns().contains(&KeyIndex)
    }

    /// The canonical column name, matching what the simulator wrote for
    /// this version.  Used in error detail and the raw-data view.
    pub fn column_name(self, col: Column) -> &'static str {
        match col {
            Distribution => "Distribution",
            Scale => "Scale",
            KeyIndex => "Key_Index",
            LoadFactor => "Load_Factor",
            Probes(Chaining) => "Chaining_Probes",
            Probes(LinearProbing) => "Linear_Probing_Probes",
            Probes(QuadraticProbing) => "Quadratic_Probing_Probes",
            Probes(DoubleHashing) => "Double_Hashing_Probes",
            // V1/V2 used short timing names; the per-key layout spelled
            // them out in full.
            TimeMs(t) => match (self, t) {
                (SchemaVersion::V3, Chaining) => "Chaining_Time_ms",
                (SchemaVersion::V3, LinearProbing) => "Linear_Probing_Time_ms",
                (SchemaVersion::V3, QuadraticProbing) => "Quadratic_Probing_Time_ms",
                (SchemaVersion::V3, DoubleHashing) => "Double_Hashing_Time_ms",
                (_, Chaining) => "Chaining_Time_ms",
                (_, LinearProbing) => "Linear_Time_ms",
                (_, QuadraticProbing) => "Quadratic_Time_ms",
                (_, DoubleHashing) => "Double_Time_ms",
            },
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => write!(f, "v1 – summary rows"),
            SchemaVersion::V2 => write!(f, "v2 – summary rows + scale"),
            SchemaVersion::V3 => write!(f, "v3 – per-key rows"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_counts_match_layouts() {
        assert_eq!(SchemaVersion::V1.columns().len(), 9);
        assert_eq!(SchemaVersion::V2.columns().len(), 10);
        assert_eq!(SchemaVersion::V3.columns().len(), 11);
    }

    #[test]
    fn optional_columns_per_version() {
        assert!(!SchemaVersion::V1.has_scale());
        assert!(!SchemaVersion::V1.has_key_index());
        assert!(SchemaVersion::V2.has_scale());
        assert!(SchemaVersion::V3.has_key_index());
    }

    #[test]
    fn chaining_timing_only_in_per_key_layout() {
        let timed = |v: SchemaVersion| {
            v.columns()
                .iter()
                .any(|c| matches!(c, TimeMs(Chaining)))
        };
        assert!(!timed(SchemaVersion::V1));
        assert!(!timed(SchemaVersion::V2));
        assert!(timed(SchemaVersion::V3));
    }
}
