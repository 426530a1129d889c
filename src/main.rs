use anyhow::{Context, Result};
use clap::Parser;
use resume_editor::cli::Cli;
use resume_editor::core::{ConfigManager, DirectorySink, ServiceClient};
use resume_editor::editor::EditorController;
use resume_editor::session::Session;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("resume_editor=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::load()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_download_dir(dir);
    }

    init_logging(&config.output.log_file)?;
    info!("Starting resume editor");
    config.log_summary();

    let client = ServiceClient::new(&config.service.api_url, config.service.timeout_seconds)?;
    let sink = DirectorySink::new(config.output.download_dir.clone());
    let controller = EditorController::new(Arc::new(client), Arc::new(sink));

    Session::new(controller).run().await
}
