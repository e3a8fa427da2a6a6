// slashroute - slash command router
//
// Reads interaction envelopes as JSON lines and routes each one through the
// command tree, printing the replies it produced.
//
// Architecture:
// - Registry (dispatch): command -> group -> subcommand routing by name
// - Builtins: the command set this binary serves
// - Replay: one tokio task per interaction, outcomes in input order
// - Config: TOML file + env overrides, tracing for logs

mod cli;
mod startup;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use slashroute::config::Config;
use slashroute::dispatch::CommandRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never needs logging or a registry
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env()?;

    // Guard must outlive every log call so file output gets flushed
    let _file_guard = slashroute::logging::init(&config.logging);

    let registry = Arc::new(slashroute::builtins::registry(&config));

    match cli.command {
        Some(Commands::Schema) => print_schema(&registry),
        Some(Commands::Replay { file }) => run_replay(registry, file).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => {
            startup::print_startup(&config, &registry);
            startup::log_startup(&registry);
            run_replay(registry, None).await
        }
    }
}

fn print_schema(registry: &CommandRegistry) -> Result<()> {
    let schemas = registry.export_schemas();
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}

async fn run_replay(registry: Arc<CommandRegistry>, file: Option<PathBuf>) -> Result<()> {
    let input: Box<dyn AsyncBufRead + Unpin + Send> = match file {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Cannot open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let outcomes = slashroute::replay::replay(registry, input).await?;

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    tracing::info!(
        interactions = outcomes.len(),
        failed,
        "Replay finished"
    );
    Ok(())
}
