use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use explorer_core::settings::DEFAULT_ARCHIVE_NAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Per-user directory, relative to the home directory.
const APP_DIR: &str = ".ecommerce-explorer";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.ecommerce-explorer/` and its `logs/` and `data/` subdirectories
/// exist, returning the application directory.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(APP_DIR);
    std::fs::create_dir_all(app_dir.join("logs"))?;
    std::fs::create_dir_all(app_dir.join("data"))?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to an [`EnvFilter`] directive.
///
/// Unknown values are passed through so `RUST_LOG`-style directives work.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to `log_file` (appended, no ANSI colours) when given, otherwise to
/// stderr. Falls back to `"info"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()?;
        }
    }

    Ok(())
}

// ── Archive discovery ──────────────────────────────────────────────────────────

/// Places the archive is looked for, in priority order:
/// 1. `<cwd>/cleaned_ecommerce_data.zip`
/// 2. `~/.ecommerce-explorer/data/cleaned_ecommerce_data.zip`
pub fn archive_candidates(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join(DEFAULT_ARCHIVE_NAME)];
    if let Some(home) = home {
        candidates.push(home.join(APP_DIR).join("data").join(DEFAULT_ARCHIVE_NAME));
    }
    candidates
}

/// Resolve the archive to load.
///
/// An explicit path is used as given. Otherwise the first existing
/// candidate wins; if none exists the first candidate is returned so the
/// loader reports it as missing.
pub fn resolve_archive_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir();
    first_existing(archive_candidates(&cwd, home.as_deref()))
        .unwrap_or_else(|| cwd.join(DEFAULT_ARCHIVE_NAME))
}

fn first_existing(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
