mod observability;
mod output;
mod pipeline;

use anyhow::{Context, Result};
use fhir_etl_config::{load_config, resolve_config_path};
use tracing::{info, warn};

use output::{print_error, print_loads, print_skipped, print_success};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config_path = resolve_config_path(|key| std::env::var(key).ok());
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

    observability::apply_logging_level(&config.logging.level);
    info!(
        config = %config_path.display(),
        data_dir = %config.data_dir.display(),
        "Starting load"
    );

    let summary = pipeline::run(&config).await?;

    print_skipped(&summary.skipped);
    print_loads(&summary.loads);

    let failed: Vec<&str> = summary.failed_tables().collect();
    if !failed.is_empty() {
        warn!(tables = ?failed, "Some tables were not loaded");
    }

    info!(
        files = summary.files_read,
        skipped = summary.skipped.len(),
        "Run finished"
    );
    print_success("Data loaded successfully into the database.");

    Ok(())
}
