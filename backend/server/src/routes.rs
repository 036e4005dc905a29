use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    body::Bytes,
    extract::{self, Path, Query},
    http::StatusCode,
};
use store::models::{Item, PageResult, Stats};
use tracing::info;

use crate::{
    error::AppError,
    search::{search, stats},
    state::State,
    utils::{get_item_id, get_list_query, get_new_item},
};

pub async fn list_items_handler(
    extract::State(state): extract::State<Arc<State>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageResult>, AppError> {
    let query = get_list_query(&params)?;
    let items = state.store.read_all().await?;

    Ok(Json(search(items, &query)))
}

pub async fn get_item_handler(
    extract::State(state): extract::State<Arc<State>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let id = get_item_id(&raw_id)?;

    state
        .store
        .read_all()
        .await?
        .into_iter()
        .find(|item| item.id == id)
        .map(Json)
        .ok_or(AppError::ItemNotFound)
}

pub async fn create_item_handler(
    extract::State(state): extract::State<Arc<State>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let new_item = get_new_item(body)?;
    let item = state.store.append(new_item).await?;

    info!("Created item {} ({})", item.id, item.name);

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn stats_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Result<Json<Stats>, AppError> {
    let items = state.store.read_all().await?;

    Ok(Json(stats(&items)))
}

pub async fn fallback_handler() -> AppError {
    AppError::RouteNotFound
}
