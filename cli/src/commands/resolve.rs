use anyhow::{Context, Result, bail};
use clap::Args;
use ec_core::Node;
use resolution::{ChainLoader, DisplayConfig, LoadReport, Resolver};
use std::sync::Arc;
use storage::CategoryStore;

use super::{ConfigArgs, load_config};
use crate::output;

#[derive(Args)]
pub struct ResolveArgs {
    #[arg(help = "Id of the category to resolve")]
    pub category_id: String,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Show the loaded chain and fetch counts")]
    pub verbose: bool
}

pub async fn run(args: ResolveArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    ::config::validate(&config).context("Invalid configuration")?;

    let store = Arc::new(
        CategoryStore::from_config(&config.storage)
            .await
            .context("Failed to open category store")?
    );

    tracing::debug!(backend = store.backend_name(), "Opened category store");

    let Some(mut leaf) = store.get_node(&args.category_id).await? else {
        bail!(
            "Category '{}' not found in {} store",
            args.category_id,
            store.backend_name()
        );
    };

    let loader = ChainLoader::with_config(store.clone(), store.clone(), &config.loader);
    let report = loader
        .load(&mut leaf)
        .await
        .with_context(|| format!("Failed to load chain of category '{}'", args.category_id))?;

    let display = Resolver::from_config(&config.resolver).resolve(&leaf);
    let chain: Vec<&str> = leaf.chain().map(|node| node.id.as_str()).collect();

    if args.json {
        let output = serde_json::json!({
            "category_id": args.category_id,
            "display": display.template_context(),
            "chain": chain,
            "load": {
                "skipped": report.skipped,
                "ancestors_requested": report.ancestors_requested,
                "ancestors_wired": report.ancestors_wired,
                "side_data_requested": report.side_data_requested,
                "side_data_attached": report.side_data_attached
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_display(&args.category_id, &display);

    if args.verbose {
        print_load_details(&leaf, &chain, &report);
    }

    if !display.has_content() {
        println!();
        output::hint("Set a message on this category, or set inherit = true and a message on an ancestor");
    }

    Ok(())
}

fn print_display(category_id: &str, display: &DisplayConfig) {
    output::header(&format!("Empty-category message for {category_id}"));
    println!();
    output::field("message", display.message());
    output::field("image", display.side_data_url());
    output::field("css_class", display.css_class());
    output::field("image_size", display.image_size().as_ref());
    output::field("image_max_width", display.image_max_width());
    output::field("image_justify", display.image_justify());
    output::field("text_align", display.text_align_css());
    output::field("has_content", output::bool_str(display.has_content()));
}

fn print_load_details(leaf: &Node, chain: &[&str], report: &LoadReport) {
    println!();
    output::subheader("Chain:");
    for (depth, node) in leaf.chain().enumerate() {
        let marker = if node.message().is_empty() { " " } else { "*" };
        println!(
            "  {marker} {depth:>2} {} (inherit: {})",
            node.id,
            output::bool_str(node.inherits())
        );
    }

    println!();
    output::subheader("Load:");
    if report.skipped {
        println!("  skipped, category has no empty-category configuration");
        return;
    }
    println!(
        "  ancestors: {} requested, {} wired ({} nodes in chain)",
        report.ancestors_requested,
        report.ancestors_wired,
        chain.len()
    );
    println!(
        "  side data: {} requested, {} attached",
        report.side_data_requested, report.side_data_attached
    );
    println!("  fetches:   {}", report.fetches());
}
