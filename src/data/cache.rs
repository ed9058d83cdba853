use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{self, LoadError};
use super::model::WideTable;
use super::schema::SchemaVersion;

// ---------------------------------------------------------------------------
// TableCache – load once, reuse until the file or schema changes
// ---------------------------------------------------------------------------

struct CacheEntry {
    schema: SchemaVersion,
    modified: SystemTime,
    table: Arc<WideTable>,
}

/// Memoizes loaded tables so UI interactions never re-read the file.
///
/// Invalidation rule: an entry is reused only while the file's modification
/// time and the selected schema version both match; otherwise the file is
/// re-read.  The cache is owned by application state rather than being a
/// process-wide global.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the table for `path`, reading the file only when the cache
    /// holds nothing current for it.
    pub fn load(
        &mut self,
        path: &Path,
        schema: SchemaVersion,
    ) -> Result<Arc<WideTable>, LoadError> {
        let modified = file_mtime(path)?;

        if let Some(entry) = self.entries.get(path) {
            if entry.schema == schema && entry.modified == modified {
                log::debug!("cache hit for {}", path.display());
                return Ok(entry.table.clone());
            }
        }

        let table = Arc::new(loader::load(path, schema)?);
        log::info!(
            "loaded {} rows from {} ({schema})",
            table.len(),
            path.display()
        );
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                schema,
                modified,
                table: table.clone(),
            },
        );
        Ok(table)
    }

    /// Drop a single cached entry, forcing the next load to re-read.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

fn file_mtime(path: &Path) -> Result<SystemTime, LoadError> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    meta.modified().map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    const SAMPLE: &str = "h,h,h,h,h,h,h,h,h\nUniform,0.10,1.05,1.1,1.2,1.3,0.01,0.02,0.03\n";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(contents.as_bytes()).expect("write");
        f.flush().expect("flush");
        f
    }

    #[test]
    fn repeated_loads_share_one_table() {
        let f = write_csv(SAMPLE);
        let mut cache = TableCache::new();

        let a = cache.load(f.path(), SchemaVersion::V1).expect("first load");
        let b = cache.load(f.path(), SchemaVersion::V1).expect("second load");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn mtime_change_invalidates() {
        let f = write_csv(SAMPLE);
        let mut cache = TableCache::new();

        let a = cache.load(f.path(), SchemaVersion::V1).expect("first load");

        // Rewrite with one more row and force a distinct mtime.
        let extra = format!("{SAMPLE}Skewed,0.20,1.10,1.2,1.3,1.4,0.02,0.03,0.04\n");
        std::fs::write(f.path(), &extra).expect("rewrite");
        let handle = std::fs::File::options()
            .write(true)
            .open(f.path())
            .expect("reopen");
        handle
            .set_modified(SystemTime::now() + Duration::from_secs(5))
            .expect("bump mtime");

        let b = cache.load(f.path(), SchemaVersion::V1).expect("reload");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn schema_change_invalidates() {
        let v2 = "h,h,h,h,h,h,h,h,h,h\nUniform,Large,0.10,1.05,1.1,1.2,1.3,0.01,0.02,0.03\n";
        let f = write_csv(v2);
        let mut cache = TableCache::new();

        let a = cache.load(f.path(), SchemaVersion::V2).expect("v2 load");
        assert_eq!(a.records[0].scale.as_deref(), Some("Large"));

        // Same file reinterpreted under v1 must not be served from cache;
        // it now has the wrong column count and fails loudly.
        let err = cache.load(f.path(), SchemaVersion::V1).expect_err("v1 mismatch");
        assert!(matches!(err, LoadError::SchemaMismatch { .. }));
    }

    #[test]
    fn missing_file_reported_before_touching_cache() {
        let mut cache = TableCache::new();
        let err = cache
            .load(Path::new("/no/such/file.csv"), SchemaVersion::V1)
            .expect_err("should fail");
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }
}
