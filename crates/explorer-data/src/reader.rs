//! Archive access and CSV parsing for the dataset explorer.
//!
//! Opens the bundled zip archive, decompresses the named CSV entry and parses
//! it into a [`RawTable`] of untyped string fields. Malformed rows are
//! dropped here; typing happens later in the normalizer.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use explorer_core::error::{ExplorerError, Result};
use tracing::{debug, info};
use zip::result::ZipError;
use zip::ZipArchive;

// ── RawTable ──────────────────────────────────────────────────────────────────

/// Parsed-but-untyped CSV content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header names exactly as they appear in the file.
    pub headers: Vec<String>,
    /// Data rows; every row has `headers.len()` fields.
    pub rows: Vec<Vec<String>>,
    /// Rows dropped because they did not match the header shape.
    pub skipped_rows: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decompress `entry_name` from the zip archive at `archive_path` and parse it.
///
/// A missing archive or entry is a deployment problem and is reported as
/// [`ExplorerError::ArchiveNotFound`] / [`ExplorerError::ArchiveEntryNotFound`],
/// never as an empty table.
pub fn read_archive(archive_path: &Path, entry_name: &str) -> Result<RawTable> {
    let file = File::open(archive_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExplorerError::ArchiveNotFound(archive_path.to_path_buf()),
        _ => ExplorerError::Io(e),
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    debug!(
        "Opened archive {} ({} entries)",
        archive_path.display(),
        archive.len()
    );

    let entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ExplorerError::ArchiveEntryNotFound {
                archive: archive_path.to_path_buf(),
                entry: entry_name.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let table = parse_csv(entry)?;

    info!(
        "Read {} rows ({} skipped) from {}:{}",
        table.rows.len(),
        table.skipped_rows,
        archive_path.display(),
        entry_name
    );

    Ok(table)
}

/// Parse delimited text with a header row.
///
/// Rows with fewer fields than the header are padded with empty fields,
/// which load as missing values. Rows with more fields, or that are not
/// valid UTF-8, are skipped and counted. Blank lines are ignored. Only an
/// I/O failure of the underlying stream aborts the parse.
pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut skipped_rows = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        match result {
            Ok(record) if record.len() <= headers.len() => {
                let mut row: Vec<String> = record.iter().map(str::to_string).collect();
                row.resize(headers.len(), String::new());
                rows.push(row);
            }
            Ok(record) => {
                skipped_rows += 1;
                debug!(
                    "Skipping record {}: {} fields, expected {}",
                    idx + 1,
                    record.len(),
                    headers.len()
                );
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                skipped_rows += 1;
                debug!("Skipping record {}: {}", idx + 1, e);
            }
        }
    }

    Ok(RawTable {
        headers,
        rows,
        skipped_rows,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
