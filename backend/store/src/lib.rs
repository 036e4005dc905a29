//! # Item Store
//!
//! Flat JSON file holding the whole catalog.
//!
//! ## Requirements
//!
//! - Small dataset, read whole on every request
//! - No indexing, no caching
//! - Writes rewrite the entire file
//!
//! ## Notes
//!
//! - There is no locking. Two concurrent appends both read the same snapshot
//!   and the later write wins, dropping the other item. Accepted for a
//!   single-writer catalog.
//! - A missing file reads as an empty catalog so a fresh checkout can start
//!   without seeding.
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::Utc;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

pub mod models;

use models::{Item, NewItem};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No id left after {0}")]
    IdsExhausted(i64),
}

#[derive(Debug, Clone)]
pub struct ItemStore {
    path: PathBuf,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_all(&self) -> Result<Vec<Item>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} missing, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn write_all(&self, items: &[Item]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        fs::write(&self.path, json)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Read, push, rewrite. Existing entries are written back untouched.
    pub async fn append(&self, new_item: NewItem) -> Result<Item, StoreError> {
        let mut items = self.read_all().await?;

        let item = new_item.into_item(next_id(&items, Utc::now().timestamp_millis())?);
        items.push(item.clone());

        self.write_all(&items).await?;
        info!("Stored item {} ({} total)", item.id, items.len());

        Ok(item)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Timestamp id, bumped past the largest existing id when the clock has not
/// moved beyond it.
pub fn next_id(existing: &[Item], now_ms: i64) -> Result<i64, StoreError> {
    match existing.iter().map(|item| item.id).max() {
        Some(max) if max >= now_ms => max.checked_add(1).ok_or(StoreError::IdsExhausted(max)),
        _ => Ok(now_ms),
    }
}
