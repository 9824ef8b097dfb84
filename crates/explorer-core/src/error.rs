use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the dataset explorer.
///
/// Only configuration-level failures live here. Rows that fail to parse and
/// fields that fail type coercion are not errors: they are dropped or turned
/// into missing values by the loader.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The bundled archive does not exist on disk.
    #[error("Dataset archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// The archive exists but does not contain the expected tabular file.
    #[error("Entry {entry} not found in archive {archive}")]
    ArchiveEntryNotFound { archive: PathBuf, entry: String },

    /// The archive could not be opened or decompressed.
    #[error("Failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The CSV header could not be read.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be produced.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExplorerError {
    /// `true` for errors that mean the deployment itself is broken (missing or
    /// unreadable archive) rather than anything about the data inside it.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExplorerError::ArchiveNotFound(_)
                | ExplorerError::ArchiveEntryNotFound { .. }
                | ExplorerError::Archive(_)
        )
    }
}

/// Convenience alias used throughout the explorer crates.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_archive_not_found() {
        let err = ExplorerError::ArchiveNotFound(PathBuf::from("/data/orders.zip"));
        assert_eq!(err.to_string(), "Dataset archive not found: /data/orders.zip");
    }

    #[test]
    fn test_error_display_entry_not_found() {
        let err = ExplorerError::ArchiveEntryNotFound {
            archive: PathBuf::from("/data/orders.zip"),
            entry: "orders.csv".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("orders.csv"));
        assert!(msg.contains("/data/orders.zip"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ExplorerError = io_err.into();
        assert!(err.to_string().contains("denied"));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_error_from_zip() {
        let err: ExplorerError = zip::result::ZipError::FileNotFound.into();
        assert!(err.to_string().starts_with("Failed to read archive"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_archive_is_configuration_error() {
        assert!(ExplorerError::ArchiveNotFound(PathBuf::from("x.zip")).is_configuration());
        assert!(ExplorerError::ArchiveEntryNotFound {
            archive: PathBuf::from("x.zip"),
            entry: "x.csv".to_string(),
        }
        .is_configuration());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: ExplorerError = json_err.into();
        assert!(err.to_string().contains("Failed to serialize JSON"));
    }
}
