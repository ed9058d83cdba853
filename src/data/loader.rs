use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{SimulationRecord, WideTable};
use super::schema::{Column, SchemaVersion};

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Failure modes of a load.  Both variants are fatal to the load: the
/// caller gets a complete table or no table, never a partial one.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("schema mismatch at line {line}: {detail}")]
    SchemaMismatch { line: usize, detail: String },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn mismatch(line: usize, detail: impl Into<String>) -> LoadError {
    LoadError::SchemaMismatch {
        line,
        detail: detail.into(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the simulation CSV at `path`, assigning `schema` to its columns.
///
/// The first line of the file is always discarded: the simulator's header
/// text drifted across revisions, so column identity comes from the
/// explicit schema rather than whatever the file claims.  Numeric columns
/// are coerced on the spot; an empty metric cell becomes a missing
/// measurement rather than a zero.
pub fn load(path: &Path, schema: SchemaVersion) -> Result<WideTable, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns = schema.columns();
    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // 1-based file line, for error messages.
        let line = idx + 1;
        if idx == 0 {
            // Untrusted header line.
            continue;
        }

        let raw = result.map_err(|e| mismatch(line, e.to_string()))?;
        if raw.len() != columns.len() {
            return Err(mismatch(
                line,
                format!("expected {} columns, found {}", columns.len(), raw.len()),
            ));
        }

        records.push(parse_record(schema, &raw, line)?);
    }

    Ok(WideTable { records })
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_record(
    schema: SchemaVersion,
    raw: &csv::StringRecord,
    line: usize,
) -> Result<SimulationRecord, LoadError> {
    let mut distribution = String::new();
    let mut scale = None;
    let mut key_index = None;
    let mut load_factor = None;
    let mut probes = Vec::new();
    let mut times = Vec::new();

    for (col, cell) in schema.columns().iter().zip(raw.iter()) {
        let name = schema.column_name(*col);
        match col {
            Column::Distribution => distribution = cell.to_string(),
            Column::Scale => scale = Some(cell.to_string()),
            Column::KeyIndex => {
                let v = cell.parse::<u32>().map_err(|_| {
                    mismatch(line, format!("{name}: '{cell}' is not a positive integer"))
                })?;
                key_index = Some(v);
            }
            Column::LoadFactor => load_factor = Some(parse_f64(cell, name, line)?),
            Column::Probes(t) => probes.push((*t, parse_metric(cell, name, line)?)),
            Column::TimeMs(t) => times.push((*t, parse_metric(cell, name, line)?)),
        }
    }

    let load_factor = load_factor
        .ok_or_else(|| mismatch(line, "schema defines no Load_Factor column".to_string()))?;

    Ok(SimulationRecord {
        distribution,
        scale,
        key_index,
        load_factor,
        probes,
        times,
    })
}

fn parse_f64(cell: &str, name: &str, line: usize) -> Result<f64, LoadError> {
    cell.parse::<f64>()
        .map_err(|_| mismatch(line, format!("{name}: '{cell}' is not a number")))
}

/// Metric cells may be legitimately empty (no measurement taken).
fn parse_metric(cell: &str, name: &str, line: usize) -> Result<Option<f64>, LoadError> {
    if cell.is_empty() {
        return Ok(None);
    }
    parse_f64(cell, name, line).map(Some)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::Technique;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(contents.as_bytes()).expect("write");
        f
    }

    const V1_SAMPLE: &str = "\
Distribution,Load_Factor,Chaining_Probes,Linear_Probing_Probes,Quadratic_Probing_Probes,Double_Hashing_Probes,Linear_Time_ms,Quadratic_Time_ms,Double_Time_ms
Uniform,0.10,1.05,1.11,1.09,1.08,0.012,0.014,0.015
Uniform,0.50,1.25,1.98,1.62,1.48,0.031,0.027,0.025
Skewed,0.50,1.49,3.02,2.21,1.90,0.055,0.041,0.037
";

    #[test]
    fn loads_v1_layout() {
        let f = write_csv(V1_SAMPLE);
        let table = load(f.path(), SchemaVersion::V1).expect("load");

        assert_eq!(table.len(), 3);
        let first = &table.records[0];
        assert_eq!(first.distribution, "Uniform");
        assert_eq!(first.load_factor, 0.10);
        assert_eq!(first.scale, None);
        assert_eq!(first.key_index, None);
        assert_eq!(first.probes.len(), 4);
        assert_eq!(first.times.len(), 3);
        assert_eq!(first.probes[0], (Technique::Chaining, Some(1.05)));
        assert_eq!(first.times[0], (Technique::LinearProbing, Some(0.012)));
    }

    #[test]
    fn header_line_is_discarded_not_trusted() {
        // A header with wrong names must not matter; a missing header line
        // costs the first data row, by contract.
        let f = write_csv("bogus,header,with,completely,wrong,names,a,b,c\nUniform,0.10,1.0,1.1,1.2,1.3,0.01,0.02,0.03\n");
        let table = load(f.path(), SchemaVersion::V1).expect("load");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load(Path::new("/no/such/results_data.csv"), SchemaVersion::V1)
            .expect_err("should fail");
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn wrong_column_count_is_schema_mismatch() {
        let f = write_csv("header\nUniform,0.10,1.05\n");
        let err = load(f.path(), SchemaVersion::V1).expect_err("should fail");
        match err {
            LoadError::SchemaMismatch { line, detail } => {
                assert_eq!(line, 2);
                assert!(detail.contains("expected 9 columns"), "{detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_schema_mismatch_with_detail() {
        let f = write_csv(
            "h,h,h,h,h,h,h,h,h\nUniform,0.10,oops,1.1,1.2,1.3,0.01,0.02,0.03\n",
        );
        let err = load(f.path(), SchemaVersion::V1).expect_err("should fail");
        match err {
            LoadError::SchemaMismatch { line, detail } => {
                assert_eq!(line, 2);
                assert!(detail.contains("Chaining_Probes"), "{detail}");
                assert!(detail.contains("oops"), "{detail}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_metric_cell_is_missing_not_zero() {
        let f = write_csv("h,h,h,h,h,h,h,h,h\nUniform,0.10,1.05,1.1,1.2,1.3,,0.02,0.03\n");
        let table = load(f.path(), SchemaVersion::V1).expect("load");
        assert_eq!(table.records[0].times[0], (Technique::LinearProbing, None));
    }

    #[test]
    fn loads_v3_per_key_layout() {
        let f = write_csv(
            "Key_Index,Load_Factor,Distribution,c,l,q,d,ct,lt,qt,dt\n\
             1,0.000977,Worst_Case,1,1,1,1,0.001,0.001,0.001,0.001\n\
             2,0.001953,Worst_Case,2,3,2,2,0.001,0.002,0.001,0.001\n",
        );
        let table = load(f.path(), SchemaVersion::V3).expect("load");
        assert_eq!(table.len(), 2);
        let second = &table.records[1];
        assert_eq!(second.key_index, Some(2));
        assert_eq!(second.distribution, "Worst_Case");
        // v3 carries a chaining timing column.
        assert_eq!(second.times.len(), 4);
        assert_eq!(second.times[0], (Technique::Chaining, Some(0.001)));
    }
}
