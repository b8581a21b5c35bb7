//! Novelcraft CLI binary.
//!
//! This binary provides command-line access to the story pipeline:
//! - Generate a setting card, a prologue or a single chapter as JSON
//! - Write a whole story end to end, following one branch per chapter

use clap::Parser;
use novelcraft::{NovelcraftConfig, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use cli::{Cli, Commands, run_chapter, run_prologue, run_setting, run_write};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability(&ObservabilityConfig::new(log_level).with_json_logs(cli.json_logs))?;

    let config = match &cli.config {
        Some(path) => NovelcraftConfig::from_file(path)?,
        None => NovelcraftConfig::load()?,
    };
    tracing::debug!(model = %config.provider().model(), "Configuration loaded");

    // Execute the requested command
    match cli.command {
        Commands::Setting { prompt } => {
            run_setting(&config, &prompt).await?;
        }

        Commands::Prologue { setting } => {
            run_prologue(&config, &setting).await?;
        }

        Commands::Chapter { chapter, prompt } => {
            run_chapter(&config, chapter, &prompt).await?;
        }

        Commands::Write {
            prompt,
            chapters,
            pick,
        } => {
            run_write(&config, &prompt, chapters as usize, pick as usize).await?;
        }
    }

    Ok(())
}
