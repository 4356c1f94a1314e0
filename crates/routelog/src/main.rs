use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use routelog_core::ingestion::export_routes;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a CSV of travel routes from a location-history export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the exported `*.json` timeline files
    input_dir: PathBuf,
    /// CSV file to write the route report to (overwritten if present)
    output_file: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let batch = export_routes(&cli.input_dir, &cli.output_file).with_context(|| {
        format!(
            "failed to export routes from {} to {}",
            cli.input_dir.display(),
            cli.output_file.display()
        )
    })?;

    info!(
        files = batch.reports.len(),
        routes = batch.routes.len(),
        output = %cli.output_file.display(),
        "route export complete"
    );
    Ok(())
}
