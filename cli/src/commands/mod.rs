pub mod config;
pub mod resolve;
pub mod schema;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ecm",
    author,
    version,
    about = "Empty-category messages - resolve what a category shows when it has no products",
    long_about = "Resolves the empty-category message of a category, following inheritance up \
                  the category tree.\n\nCategories are read from an in-memory store, a JSON/YAML \
                  snapshot or PostgreSQL, selected by configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve the empty-category message of a category")]
    Resolve(resolve::ResolveArgs),

    #[command(about = "Show the custom-field schema attached to categories")]
    Schema(schema::SchemaArgs),

    #[command(subcommand, about = "Show and validate the effective configuration")]
    Config(config::ConfigCommand)
}

/// Configuration sources shared by every command.
#[derive(Args, Default)]
pub struct ConfigArgs {
    #[arg(short = 'c', long = "config", env = "ECM_CONFIG", help = "Configuration file (TOML or YAML)")]
    pub config_file: Option<PathBuf>,

    #[arg(long, help = "Storage backend: memory, snapshot or postgres")]
    pub backend: Option<String>,

    #[arg(long, help = "Category snapshot file (JSON or YAML); implies --backend snapshot")]
    pub snapshot: Option<String>,

    #[arg(long, help = "PostgreSQL connection URL; implies --backend postgres")]
    pub database_url: Option<String>,

    #[arg(long, help = "Maximum inheritance depth for both loading and resolution")]
    pub max_depth: Option<usize>
}

impl ConfigArgs {
    fn overrides(&self) -> ::config::ConfigOverrides {
        let mut overrides = ::config::ConfigOverrides::default();

        if let Some(path) = &self.snapshot {
            overrides.backend = Some("snapshot".to_string());
            overrides.snapshot_path = Some(path.clone());
        }
        if let Some(url) = &self.database_url {
            overrides.backend = Some("postgres".to_string());
            overrides.database_url = Some(url.clone());
        }
        if let Some(backend) = &self.backend {
            overrides.backend = Some(backend.clone());
        }
        if let Some(depth) = self.max_depth {
            overrides.resolver_max_depth = Some(depth);
            overrides.loader_max_depth = Some(depth);
        }

        overrides
    }
}

/// Builds the effective configuration: defaults, file, environment, flags.
pub fn load_config(args: &ConfigArgs) -> Result<::config::Config> {
    let file_config = match &args.config_file {
        Some(path) => ::config::load_from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => ::config::Config::default()
    };

    Ok(::config::merge_configs(
        ::config::Config::default(),
        file_config,
        ::config::load_overrides_from_env(),
        Some(args.overrides())
    ))
}
