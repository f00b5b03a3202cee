use crate::config::{ClassifierConfig, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "tomato-leaf", version, about = "Tomato leaf disease classifier client")]
pub struct Cli {
    /// Root URL of the classification service.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Client-side request deadline in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload images and show the diagnosis for each.
    Classify {
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Skip the backend's tomato-leaf pre-filter.
        #[arg(long)]
        no_binary_filter: bool,
    },
    /// Show the care advice for a disease label.
    Advice {
        label: String,

        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
    },
}

impl Cli {
    pub fn config(&self) -> ClassifierConfig {
        let mut config = ClassifierConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms));
        if let Command::Classify { no_binary_filter, .. } = &self.command {
            config.use_binary_filter = !no_binary_filter;
        }
        config
    }
}
