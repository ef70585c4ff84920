use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise EC_LOG_LEVEL, otherwise the configured default.
    let level = config::load_from_env()
        .map(|c| c.observability.logging_level)
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args).await,
        Commands::Schema(args) => commands::schema::run(args),
        Commands::Config(cmd) => commands::config::run(cmd)
    }
}
