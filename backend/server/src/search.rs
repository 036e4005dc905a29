//! # Query Engine
//!
//! Filters and pages the full item collection on every request.
//!
//! ## Filter
//! - Case-insensitive substring match on `name` only
//! - Empty term is a no-op
//! - Linear scan, original order preserved
//!
//! ## Pagination
//! - `start = (page - 1) * limit`, then slice up to `limit` items
//! - Pages past the end are empty but still report the filtered `total`
//! - No upper bound on `limit`
//!
//! The collection is small and read whole from disk, so there is no index and
//! nothing is cached between requests.
use store::models::{Item, ListQuery, PageResult, Stats};

pub fn search(items: Vec<Item>, query: &ListQuery) -> PageResult {
    let needle = query.q.to_lowercase();

    let matches: Vec<Item> = if needle.is_empty() {
        items
    } else {
        items
            .into_iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .collect()
    };

    let total = matches.len();
    let start = query.page.saturating_sub(1).saturating_mul(query.limit);

    let data = matches
        .into_iter()
        .skip(start)
        .take(query.limit)
        .collect();

    PageResult {
        total,
        page: query.page,
        limit: query.limit,
        data,
    }
}

pub fn stats(items: &[Item]) -> Stats {
    let total = items.len();
    let average_price = if total == 0 {
        0.0
    } else {
        items.iter().map(|item| item.price).sum::<f64>() / total as f64
    };

    Stats {
        total,
        average_price,
    }
}
