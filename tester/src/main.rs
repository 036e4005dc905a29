use std::path::PathBuf;

use clap::Parser;
use store::{ItemStore, models::Item};

const CATEGORIES: [&str; 4] = ["Electronics", "Furniture", "Kitchen", "Outdoors"];
const BASE_ID: i64 = 1_700_000_000_000;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of items to generate
    #[arg(default_value_t = 25)]
    count: usize,

    /// Items file to overwrite
    #[arg(default_value = "data/items.json")]
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args { count, path } = Args::parse();

    let items: Vec<Item> = (0..count)
        .map(|i| Item {
            id: BASE_ID + i as i64,
            name: format!("Sample Item {:03}", i + 1),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            price: ((i % 20) as f64 + 1.0) * 4.75,
            img: None,
        })
        .collect();

    println!("Items: {}", items.len());
    println!("Categories: {}", CATEGORIES.len());

    ItemStore::new(&path).write_all(&items).await?;
    println!("Wrote {}", path.display());

    Ok(())
}
