mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "twiffbot")]
#[command(about = "Classifies twiff action reports from fetched post batches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a fetched batch (tweets/*.json + users/*.json) and export
    /// the extracted reports.
    Classify {
        /// Batch directory containing `tweets/` and `users/` subdirectories.
        #[arg(long)]
        input_dir: PathBuf,
        /// Log what would happen without exporting anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the extractor against a single piece of text and print the
    /// outcome as JSON. For debugging report formats.
    ParseText {
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = twiffbot_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Classify { input_dir, dry_run } => {
            runner::run_batch(&config, &input_dir, dry_run)?;
        }
        Commands::ParseText { text } => {
            runner::parse_text(&config, &text)?;
        }
    }

    Ok(())
}
