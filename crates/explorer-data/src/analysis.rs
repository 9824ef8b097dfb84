//! Load pipeline for the dataset explorer.
//!
//! Reads the archive, normalizes the table and detects capabilities,
//! returning a [`LoadedDataset`] ready for the views.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use explorer_core::error::Result;
use explorer_core::models::NormalizedTable;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::normalizer;
use crate::reader::read_archive;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadMetadata {
    /// RFC 3339 timestamp of when the load finished.
    pub generated_at: String,
    pub archive_path: String,
    pub entry_name: String,
    /// Rows kept after parsing.
    pub rows_loaded: usize,
    /// Rows dropped because they did not match the header.
    pub rows_skipped: usize,
    /// Columns after normalization, derived ones included.
    pub column_count: usize,
    /// Wall-clock seconds spent decompressing and parsing.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing.
    pub normalize_time_seconds: f64,
}

/// The normalized table together with what can be computed from it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: NormalizedTable,
    pub capabilities: Capabilities,
    pub metadata: LoadMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full load pipeline.
///
/// 1. Decompress `entry_name` from the archive and parse it.
/// 2. Normalize column names and typed fields.
/// 3. Detect which aggregates the table supports.
///
/// Missing archive or entry is an error; malformed rows and fields are not.
pub fn load_dataset(archive_path: &Path, entry_name: &str) -> Result<LoadedDataset> {
    // ── Step 1: Read ──────────────────────────────────────────────────────────
    let load_start = Instant::now();
    let raw = read_archive(archive_path, entry_name)?;
    let rows_skipped = raw.skipped_rows;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Normalize ─────────────────────────────────────────────────────
    let normalize_start = Instant::now();
    let table = normalizer::from_raw(raw);
    let normalize_time = normalize_start.elapsed().as_secs_f64();

    debug!(
        "Load took {:.3}s, normalize took {:.3}s",
        load_time, normalize_time
    );

    // ── Step 3: Capabilities ──────────────────────────────────────────────────
    let capabilities = Capabilities::detect(&table);
    for aggregate in capabilities.unavailable() {
        warn!(
            "{} not available: missing column(s) {:?}",
            aggregate,
            Capabilities::missing_columns(&table, aggregate)
        );
    }

    let metadata = LoadMetadata {
        generated_at: Utc::now().to_rfc3339(),
        archive_path: archive_path.display().to_string(),
        entry_name: entry_name.to_string(),
        rows_loaded: table.row_count(),
        rows_skipped,
        column_count: table.column_count(),
        load_time_seconds: load_time,
        normalize_time_seconds: normalize_time,
    };

    info!(
        "Dataset ready: {} rows, {} columns",
        metadata.rows_loaded, metadata.column_count
    );

    Ok(LoadedDataset {
        table,
        capabilities,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::capabilities::Aggregate;
    use explorer_core::error::ExplorerError;
    use explorer_core::models::{GRAND_TOTAL, ORDER_MONTH};
    use std::io::{Cursor, Write};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    pub(crate) fn write_zip(dir: &Path, entry: &str, content: &str) -> PathBuf {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options: FileOptions<'_, ()> = FileOptions::default();
            zip.start_file(entry, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        let path = dir.join("orders.zip");
        std::fs::write(&path, &buf).unwrap();
        path
    }

    pub(crate) const ORDERS_CSV: &str = "\
Increment ID,Customer ID,Created At,Grand Total,Status,Payment Method,Category Name 1
A100,C1,2017-03-15 10:00:00,\"1,000\",complete,cod,Mobiles
A100,C1,2017-03-15 10:00:00,200,complete,cod,Mobiles
A101,C2,2017-04-01 09:30:00,300,canceled,Easypay,Books
broken,row,with,far,too,many,fields,for,the,header
A102,C3,2018-01-03 12:00:00,abc,complete,cod,Books
";

    #[test]
    fn test_load_dataset_basic_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "orders.csv", ORDERS_CSV);

        let dataset = load_dataset(&path, "orders.csv").unwrap();

        assert_eq!(dataset.table.row_count(), 4);
        assert!(dataset.table.has_column(GRAND_TOTAL));
        assert!(dataset.table.has_column(ORDER_MONTH));
        assert!(dataset.capabilities.unavailable().is_empty());
    }

    #[test]
    fn test_load_dataset_metadata_fields_populated() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "orders.csv", ORDERS_CSV);

        let meta = load_dataset(&path, "orders.csv").unwrap().metadata;

        assert!(!meta.generated_at.is_empty());
        assert_eq!(meta.entry_name, "orders.csv");
        assert_eq!(meta.rows_loaded, 4);
        assert_eq!(meta.rows_skipped, 1);
        assert_eq!(meta.column_count, 9);
        assert!(meta.load_time_seconds >= 0.0);
        assert!(meta.normalize_time_seconds >= 0.0);
    }

    #[test]
    fn test_load_dataset_reports_missing_capabilities() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "orders.csv", "increment_id,status\nA1,complete\n");

        let dataset = load_dataset(&path, "orders.csv").unwrap();
        assert!(dataset.capabilities.supports(Aggregate::TotalOrders));
        assert!(!dataset.capabilities.supports(Aggregate::TotalRevenue));
    }

    #[test]
    fn test_load_dataset_missing_archive_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(&dir.path().join("missing.zip"), "orders.csv").unwrap_err();
        assert!(matches!(err, ExplorerError::ArchiveNotFound(_)));
    }
}
