//! ragyt CLI entry point.

use anyhow::Result;
use clap::Parser;
use ragyt::cli::{commands, Cli, Commands};
use ragyt::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ragyt={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Fetch { input, api_key, output } => {
            commands::run_fetch(input, api_key.clone(), output.clone(), settings).await?;
        }

        Commands::Chunk { input } => {
            commands::run_chunk(input, settings).await?;
        }

        Commands::Search {
            input,
            query,
            k,
            min_score,
        } => {
            commands::run_search(input, query, *k, *min_score, settings).await?;
        }

        Commands::Ask {
            input,
            question,
            model,
            max_turns,
        } => {
            commands::run_ask(input, question, model.clone(), *max_turns, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
