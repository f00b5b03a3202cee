pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

use clap::Parser;
use cli::{Cli, Command};
use error::AppError;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns whether every requested classification succeeded.
pub async fn run() -> Result<bool, AppError> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.config();
    tracing::debug!(?config, "starting");

    match &cli.command {
        Command::Classify { images, .. } => {
            commands::classify::classify_images(&config, images, cli.json).await
        }
        Command::Advice { label, confidence } => {
            commands::classify::show_advice(label, *confidence, cli.json)?;
            Ok(true)
        }
    }
}
