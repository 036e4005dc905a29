use std::sync::LazyLock;

use regex::Regex;
use store::models::NewItem;

static CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Cc}").expect("control character pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn sanitize(input: &str) -> String {
    let s = CONTROL.replace_all(input, " ");

    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Cleans names in place; `None` when the record cannot be stored.
pub fn sanitize_item(mut item: NewItem) -> Option<NewItem> {
    item.name = sanitize(&item.name);
    item.category = sanitize(&item.category);

    if item.name.is_empty()
        || item.category.is_empty()
        || !item.price.is_finite()
        || item.price < 0.0
    {
        return None;
    }

    Some(item)
}

pub fn name_key(name: &str) -> String {
    sanitize(name).to_lowercase()
}
