mod bootstrap;

use anyhow::{Context, Result};
use explorer_core::settings::Settings;
use explorer_data::views::Report;
use explorer_runtime::dashboard::DashboardSession;
use explorer_runtime::data_provider::{DataProvider, DataSource};
use explorer_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    let app_dir = bootstrap::ensure_directories()?;
    // The dashboard owns the terminal, so its logs go to a file by default.
    let log_file = match (&settings.log_file, settings.view.as_str()) {
        (Some(path), _) => Some(path.clone()),
        (None, "dashboard") => Some(app_dir.join("logs").join("explorer.log")),
        (None, _) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("E-commerce Explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let archive = bootstrap::resolve_archive_path(settings.archive.as_deref());
    let provider = DataProvider::new(DataSource::new(&archive, settings.entry.as_str()));

    let dataset = match provider.get() {
        Ok(dataset) => dataset,
        Err(err) => {
            if err.is_configuration() {
                tracing::error!(
                    "Cannot load {} from {}; pass --archive/--entry to point at the dataset",
                    settings.entry,
                    archive.display()
                );
            }
            return Err(err).context("failed to load the dataset");
        }
    };
    tracing::info!(
        "Loaded {} rows ({} skipped) from {}",
        dataset.metadata.rows_loaded,
        dataset.metadata.rows_skipped,
        archive.display()
    );

    match settings.view.as_str() {
        "dashboard" => {
            let session = DashboardSession::new(dataset, settings.year);
            let app = App::new(&settings.theme);

            // Raw mode turns Ctrl+C into a key; SIGINT from elsewhere lands here.
            tokio::select! {
                result = app.run(session) => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }

        "report" => {
            let report = Report::build(dataset, settings.year);
            println!("{}", report.to_json_pretty()?);
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
