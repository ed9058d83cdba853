use super::model::{LongObservation, LongTable, MetricType, SimulationRecord, Technique, WideTable};

// ---------------------------------------------------------------------------
// Wide → long reshape
// ---------------------------------------------------------------------------

/// Melt the wide table into one row per (record, populated metric cell).
///
/// The probe group is unpivoted first, then the timing group; within each
/// group the input row order is preserved.  A missing metric cell produces
/// no output row at all — emitting zero would misreport "not measured" as
/// "instantaneous".  Id fields pass through untouched, so the reshape
/// neither drops nor alters any information present in the source row.
pub fn to_long(table: &WideTable) -> LongTable {
    let mut rows = Vec::new();

    for record in &table.records {
        for &(technique, value) in &record.probes {
            if let Some(value) = value {
                rows.push(observation(record, technique, MetricType::Probes, value));
            }
        }
    }

    for record in &table.records {
        for &(technique, value) in &record.times {
            if let Some(value) = value {
                rows.push(observation(
                    record,
                    technique,
                    MetricType::InsertionTime,
                    value,
                ));
            }
        }
    }

    LongTable { rows }
}

fn observation(
    record: &SimulationRecord,
    technique: Technique,
    metric_type: MetricType,
    value: f64,
) -> LongObservation {
    LongObservation {
        distribution: record.distribution.clone(),
        scale: record.scale.clone(),
        key_index: record.key_index,
        load_factor: record.load_factor,
        technique,
        metric_type,
        value,
    }
}
