//! # Item Import
//!
//! Merges items from an external JSON feed into the catalog store.
//!
//! ## Source
//! - Local path or `http(s)` URL
//! - Either a bare array of `{ name, category, price, img? }` or `{ "items": [...] }`
//!
//! ## Merge Rules
//! 1. Names and categories are cleaned: control characters dropped, whitespace collapsed, trimmed.
//!
//! 2. Records left with a blank name or category, or a negative price, are counted as invalid and skipped.
//!
//! 3. A name already in the store, or earlier in the same feed, compared case-insensitively, is a duplicate and skipped.
//!
//! 4. New records get timestamp ids from the same allocator the API uses, so ids stay unique and increasing.
//!
//! 5. The store is rewritten once at the end. Existing entries are untouched.
//!
//! ## Notes
//! - Run it while the API is idle. The store has no lock and a POST landing mid-import is lost.
use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use store::{ItemStore, next_id};
use tracing::{debug, info};

pub mod models;
pub mod utils;

use models::{ImportSource, ImportSummary};
use utils::{is_remote, name_key, sanitize_item};

pub async fn import_items(source: &str, store: &ItemStore, dry_run: bool) -> Result<ImportSummary> {
    let incoming = fetch_source(source).await?;
    let mut items = store.read_all().await?;

    println!("Loaded Items: {}", items.len());
    println!("Incoming Records: {}\n", incoming.len());

    let mut known: HashSet<String> = items.iter().map(|item| name_key(&item.name)).collect();
    let mut summary = ImportSummary::default();

    let pb = ProgressBar::new(incoming.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    for record in incoming {
        pb.inc(1);

        let Some(new_item) = sanitize_item(record) else {
            summary.invalid += 1;
            continue;
        };

        if !known.insert(name_key(&new_item.name)) {
            debug!("Skipping duplicate {}", new_item.name);
            summary.duplicates += 1;
            continue;
        }

        pb.set_message(new_item.name.clone());

        #[cfg(feature = "verbose")]
        println!("New item! {}", new_item.name);

        let id = next_id(&items, Utc::now().timestamp_millis())?;
        items.push(new_item.into_item(id));
        summary.imported += 1;
    }

    pb.finish_with_message("Done");
    summary.total = items.len();

    if summary.imported == 0 {
        println!("No new items found. Exiting.");
    } else if dry_run {
        println!("Dry run, {} not written", store.path().display());
    } else {
        store.write_all(&items).await?;
        info!("Wrote {} items to {}", items.len(), store.path().display());
    }

    Ok(summary)
}

async fn fetch_source(source: &str) -> Result<Vec<store::models::NewItem>> {
    let text = if is_remote(source) {
        reqwest::get(source)
            .await
            .with_context(|| format!("Failed to fetch {source}"))?
            .error_for_status()?
            .text()
            .await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read {source}"))?
    };

    let parsed: ImportSource =
        serde_json::from_str(&text).with_context(|| format!("Unrecognized import format in {source}"))?;

    Ok(parsed.into_items())
}
