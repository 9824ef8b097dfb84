use clap::Parser;
use std::path::PathBuf;

/// File name of the bundled archive and of the CSV inside it.
pub const DEFAULT_ARCHIVE_NAME: &str = "cleaned_ecommerce_data.zip";
pub const DEFAULT_ENTRY_NAME: &str = "cleaned_ecommerce_data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore the Pakistan e-commerce transaction dataset in the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecommerce-explorer",
    about = "Explore the Pakistan e-commerce transaction dataset in the terminal",
    version
)]
pub struct Settings {
    /// Path to the zipped dataset (discovered automatically if not specified)
    #[arg(long, env = "EXPLORER_ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Name of the CSV file inside the archive
    #[arg(long, default_value = DEFAULT_ENTRY_NAME)]
    pub entry: String,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "report"])]
    pub view: String,

    /// Calendar year to analyse (defaults to the earliest year present)
    #[arg(long)]
    pub year: Option<i32>,

    /// Display theme
    #[arg(long, default_value = "dark", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, so tests
    /// do not depend on the process command line.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
