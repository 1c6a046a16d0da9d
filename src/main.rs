use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod command;
mod config;
mod error;
mod github;
mod scaffold;
mod vercel;
mod workflow;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        report_failure(&e);
        std::process::exit(1);
    }
}

/// The one error line a failed run prints, with its cause chain inline.
fn report_failure(e: &anyhow::Error) {
    error!("🔴  Error: {:#}", e);
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Version) => {
            command::run_version();
        }
        Some(Commands::Create { name }) => {
            command::run_create(name, cli.credentials, cli.config.as_deref()).await?;
        }
        None => {
            // No command specified, show help
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Use 'gover create --name <NAME>' to bootstrap a new application.");
        }
    }

    Ok(())
}
