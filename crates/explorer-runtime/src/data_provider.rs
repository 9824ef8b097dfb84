//! Lazily loaded, read-only dataset provider.
//!
//! The archive is read and normalized on the first [`DataProvider::get`] and
//! the result is kept for the lifetime of the provider. Concurrent first
//! calls collapse into a single load; a failed load is not cached.

use std::path::{Path, PathBuf};

use explorer_core::error::Result;
use explorer_data::analysis::{load_dataset, LoadedDataset};
use once_cell::sync::OnceCell;

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub archive_path: PathBuf,
    pub entry_name: String,
}

impl DataSource {
    pub fn new(archive_path: impl Into<PathBuf>, entry_name: impl Into<String>) -> Self {
        Self {
            archive_path: archive_path.into(),
            entry_name: entry_name.into(),
        }
    }
}

/// Single-entry cache around [`load_dataset`].
///
/// # Example
/// ```no_run
/// use explorer_runtime::data_provider::{DataProvider, DataSource};
///
/// let provider = DataProvider::new(DataSource::new(
///     "cleaned_ecommerce_data.zip",
///     "cleaned_ecommerce_data.csv",
/// ));
/// let dataset = provider.get()?;
/// println!("rows: {}", dataset.table.row_count());
/// # Ok::<(), explorer_core::ExplorerError>(())
/// ```
#[derive(Debug)]
pub struct DataProvider {
    source: DataSource,
    cell: OnceCell<LoadedDataset>,
}

impl DataProvider {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// The loaded dataset, loading it on first use.
    ///
    /// Every successful call returns the same instance.
    pub fn get(&self) -> Result<&LoadedDataset> {
        self.cell.get_or_try_init(|| {
            tracing::debug!(
                archive = %self.source.archive_path.display(),
                entry = %self.source.entry_name,
                "loading dataset"
            );
            load_dataset(&self.source.archive_path, &self.source.entry_name)
        })
    }

    /// `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn archive_path(&self) -> &Path {
        &self.source.archive_path
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use explorer_core::ExplorerError;
    use std::io::{Cursor, Write};
    use std::sync::Arc;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    pub(crate) const ORDERS_CSV: &str = "\
increment_id,customer_id,created_at,grand_total,status,payment_method,category_name_1
A100,C1,2016-07-01 10:00:00,100,complete,cod,Mobiles
A101,C2,2017-03-15 10:00:00,\"1,200\",complete,Easypay,Books
A102,C2,2018-08-28 09:00:00,300,canceled,cod,Books
";

    pub(crate) fn write_archive(dir: &Path, content: &str) -> PathBuf {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options: FileOptions<'_, ()> = FileOptions::default();
            zip.start_file("orders.csv", options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        let path = dir.join("orders.zip");
        std::fs::write(&path, &buf).unwrap();
        path
    }

    #[test]
    fn test_get_returns_same_instance() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), ORDERS_CSV);
        let provider = DataProvider::new(DataSource::new(path, "orders.csv"));

        assert!(!provider.is_loaded());
        let first = provider.get().unwrap() as *const LoadedDataset;
        let second = provider.get().unwrap() as *const LoadedDataset;
        assert_eq!(first, second);
        assert!(provider.is_loaded());
    }

    #[test]
    fn test_get_loads_once_even_if_archive_disappears() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), ORDERS_CSV);
        let provider = DataProvider::new(DataSource::new(&path, "orders.csv"));

        assert_eq!(provider.get().unwrap().table.row_count(), 3);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(provider.get().unwrap().table.row_count(), 3);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.zip");
        let provider = DataProvider::new(DataSource::new(&path, "orders.csv"));

        let err = provider.get().unwrap_err();
        assert!(matches!(err, ExplorerError::ArchiveNotFound(_)));
        assert!(!provider.is_loaded());

        write_archive(dir.path(), ORDERS_CSV);
        assert_eq!(provider.get().unwrap().table.row_count(), 3);
    }

    #[test]
    fn test_concurrent_first_calls_share_one_load() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), ORDERS_CSV);
        let provider = Arc::new(DataProvider::new(DataSource::new(path, "orders.csv")));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || {
                    provider.get().unwrap() as *const LoadedDataset as usize
                })
            })
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
