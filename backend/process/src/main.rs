use std::path::PathBuf;

use clap::Parser;
use store::ItemStore;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file path or http(s) URL
    source: String,

    #[arg(long, default_value = "data/items.json")]
    items: PathBuf,

    /// Report what would be imported without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let store = ItemStore::new(args.items);

    let summary = process::import_items(&args.source, &store, args.dry_run).await?;

    println!("\nNew Items: {}", summary.imported);
    println!("Duplicates: {}", summary.duplicates);
    println!("Invalid: {}", summary.invalid);
    println!("Item Verification: {}", summary.total);

    Ok(())
}
