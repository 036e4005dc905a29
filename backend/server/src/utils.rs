use std::collections::HashMap;

use axum::body::Bytes;
use store::models::{DEFAULT_LIMIT, DEFAULT_PAGE, ListQuery, NewItem};

use crate::error::AppError::{self, InvalidParam, ItemNotFound, MalformedPayload};

pub fn get_list_query(params: &HashMap<String, String>) -> Result<ListQuery, AppError> {
    Ok(ListQuery {
        page: positive_param(params, "page", DEFAULT_PAGE)?,
        limit: positive_param(params, "limit", DEFAULT_LIMIT)?,
        q: params.get("q").cloned().unwrap_or_default(),
    })
}

fn positive_param(
    params: &HashMap<String, String>,
    name: &'static str,
    default: usize,
) -> Result<usize, AppError> {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(value) if value >= 1 => Ok(value),
            _ => Err(InvalidParam(name)),
        },
    }
}

/// No item can have a non-integer id, so those are simply not found.
pub fn get_item_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| ItemNotFound)
}

pub fn get_new_item(body: Bytes) -> Result<NewItem, AppError> {
    let mut new_item: NewItem =
        serde_json::from_slice(&body).map_err(|e| MalformedPayload(e.to_string()))?;

    new_item.name = new_item.name.trim().to_string();
    new_item.category = new_item.category.trim().to_string();

    if new_item.name.is_empty() {
        return Err(MalformedPayload("name must not be empty".to_string()));
    }

    if new_item.category.is_empty() {
        return Err(MalformedPayload("category must not be empty".to_string()));
    }

    if !new_item.price.is_finite() || new_item.price < 0.0 {
        return Err(MalformedPayload(
            "price must be a non-negative number".to_string(),
        ));
    }

    Ok(new_item)
}
