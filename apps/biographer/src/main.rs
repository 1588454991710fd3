mod biography;
mod config;
mod dataset;
mod errors;
mod llm_client;
mod models;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::biography::{render_failure, BiographyGenerator};
use crate::config::Config;
use crate::dataset::{export_records, walk};
use crate::errors::AppError;

/// Writes short adoption biographies for the first animals of a dataset.
#[derive(Debug, Parser)]
#[command(name = "biographer", version, about)]
struct Cli {
    /// `;`-delimited dataset file (defaults to DATASET_PATH or demos/dataset_adopcion.csv)
    dataset: Option<PathBuf>,

    /// Number of records to process (defaults to SAMPLE_SIZE or 3)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Write the processed records, biographies filled in, to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate one biography from `name;breed;age;condition;requirements` instead of reading a dataset
    #[arg(short, long, conflicts_with_all = ["dataset", "output"])]
    request: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first; malformed numeric settings stop here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting biographer v{}", env!("CARGO_PKG_VERSION"));

    info!(
        "Completion credential configured: {}",
        config.credential.is_configured()
    );
    let generator = BiographyGenerator::from_config(&config)?;
    info!("Biography mode: {}", generator.mode());

    if let Some(raw) = cli.request {
        return match generator.generate(&raw).await {
            Ok(biography) => {
                println!("{biography}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                println!("{}", render_failure(&e));
                let e = AppError::from(e);
                error!("[{}] {e}", e.code());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let dataset = cli.dataset.unwrap_or_else(|| config.dataset_path.clone());
    let limit = cli.limit.unwrap_or(config.sample_size);

    let mut stdout = std::io::stdout().lock();
    let report = match walk(&dataset, limit, &generator, &mut stdout).await {
        Ok(report) => report,
        Err(e) => {
            error!("[{}] {e}", e.code());
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(output) = cli.output {
        if let Err(e) = export_records(&output, &report.records) {
            error!("[{}] {e}", e.code());
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
