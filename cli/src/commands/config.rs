use anyhow::Result;
use clap::{Args, Subcommand};

use super::{ConfigArgs, load_config};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Print the effective configuration after merging all sources")]
    Show(ShowArgs),

    #[command(about = "Validate the effective configuration")]
    Validate(ValidateArgs)
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => show(args),
        ConfigCommand::Validate(args) => validate(args)
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if config.storage.database_url.is_some() {
        config.storage.database_url = Some("***".to_string());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    match ::config::validate(&config) {
        Ok(()) => {
            output::success("Configuration is valid");
            Ok(())
        }
        Err(errors) => {
            for (field, kinds) in errors.errors() {
                output::error(&format!("{field}: {kinds:?}"));
            }
            anyhow::bail!("Configuration is invalid")
        }
    }
}
