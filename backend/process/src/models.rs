use serde::Deserialize;
use store::models::NewItem;

/// Accepted import shapes: a bare array, or an object wrapping it under `items`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ImportSource {
    List(Vec<NewItem>),
    Wrapped { items: Vec<NewItem> },
}

impl ImportSource {
    pub fn into_items(self) -> Vec<NewItem> {
        match self {
            ImportSource::List(items) | ImportSource::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub total: usize,
}
