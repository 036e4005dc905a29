//! Wire types shared by the API server and the catalog browser.
//!
//! Field names are camelCase on the wire.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

/// Create payload. The id is always assigned server side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl NewItem {
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            img: self.img,
        }
    }
}

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// List parameters, rebuilt from the query string on every request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub q: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            q: String::new(),
        }
    }
}

/// One page of a filtered listing.
///
/// `data.len() == min(limit, max(0, total - (page - 1) * limit))`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageResult {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Item>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub average_price: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}
