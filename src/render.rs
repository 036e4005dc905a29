use store::models::{Item, PageResult};

use crate::{
    pagination::{PageMarker, Pagination},
    views::{Route, ViewState},
};

const ID_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 14;
const PRICE_WIDTH: usize = 10;

pub fn render_list(page: &PageResult, width: u16) -> String {
    if page.data.is_empty() {
        return if page.total == 0 {
            "No items found.\n".to_string()
        } else {
            format!("No items on page {} of {} results.\n", page.page, page.total)
        };
    }

    let name_width = (width as usize)
        .saturating_sub(ID_WIDTH + CATEGORY_WIDTH + PRICE_WIDTH + 3)
        .max(12);

    page.data
        .iter()
        .map(|item| {
            format!(
                "{:<ID_WIDTH$} {:<name_width$} {:<CATEGORY_WIDTH$} {:>PRICE_WIDTH$}\n",
                item.id,
                truncate(&item.name, name_width),
                truncate(&item.category, CATEGORY_WIDTH),
                format!("${:.2}", item.price),
            )
        })
        .collect()
}

/// `‹ 1 … 8 9 [10] 11 12 … 20 ›`, arrows only where there is somewhere to go.
pub fn render_pagination(pagination: &Pagination) -> String {
    let mut parts = Vec::with_capacity(pagination.markers.len() + 2);

    if pagination.prev.is_some() {
        parts.push("‹".to_string());
    }

    for marker in &pagination.markers {
        parts.push(match marker {
            PageMarker::Page(n) if *n == pagination.current => format!("[{n}]"),
            PageMarker::Page(n) => n.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        });
    }

    if pagination.next.is_some() {
        parts.push("›".to_string());
    }

    parts.join(" ")
}

pub fn render_detail(item: &Item) -> String {
    let mut out = format!(
        "{}\n  Category: {}\n  Price:    ${:.2}\n",
        item.name, item.category, item.price
    );
    if let Some(img) = &item.img {
        out.push_str(&format!("  Image:    {img}\n"));
    }
    out.push_str(&format!("  Id:       {}\n", item.id));
    out
}

pub fn render_state<T>(state: &ViewState<T>, recovery: &Route, ready: impl Fn(&T) -> String) -> String {
    match state {
        ViewState::Loading => "Loading...\n".to_string(),
        ViewState::Ready(value) => ready(value),
        ViewState::Failed(message) => format!("Error: {message}\n← Back to {recovery}\n"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }

    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
