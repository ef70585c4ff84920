use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ec_core::schema::FIELD_SET_NAME;
use ec_core::field_definitions;

use crate::output;

#[derive(Args)]
pub struct SchemaArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let definitions = field_definitions();

    if args.json {
        let output = serde_json::json!({
            "field_set": FIELD_SET_NAME,
            "fields": definitions
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::header(&format!("Custom field set: {FIELD_SET_NAME}"));
    println!();

    for definition in &definitions {
        println!(
            "  {:<4} {:<18} {:<7} {}",
            definition.position,
            definition.name.cyan(),
            definition.kind.to_string(),
            definition.label
        );
        if !definition.options.is_empty() {
            println!("       {} {}", "options:".dimmed(), definition.options.join(", "));
        }
        println!("       {}", definition.help.dimmed());
    }

    Ok(())
}
