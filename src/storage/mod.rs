//! Durable storage for layouts, the plant catalog and yield ledgers.
//!
//! Everything is stored as JSON documents addressed by `(collection, key)`.
//! [`DocumentStore`] is the backend seam; [`LayoutPersistence`] owns the shape
//! of saved farm layouts.

use std::{collections::BTreeMap, io, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    layout::{clamp_dimension, Cell, FarmGrid},
    Matrix,
};

pub mod file;
pub mod memory;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;

pub const LAYOUT_COLLECTION: &str = "farmLayouts";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no user key was supplied")]
    MissingUser,
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("stored document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StorageError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::unavailable(err.to_string())
    }
}

/// Keyed JSON document backend. Writes overwrite unconditionally.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> Result<(), StorageError>;

    /// `Ok(None)` when no document exists under the key.
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StorageError>;
}

pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let document = serde_json::to_value(value)?;
    store.put(collection, key, document).await
}

pub async fn read_json<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(collection, key).await? {
        Some(document) => Ok(Some(serde_json::from_value(document)?)),
        None => Ok(None),
    }
}

/// Persisted form of a farm layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SavedLayout<'a> {
    rows: usize,
    cols: usize,
    grid: &'a [Vec<Cell>],
    saved_at: DateTime<Utc>,
}

/// Layout grids are read either as nested arrays or as row-index → col-index
/// maps, the shape document databases without nested arrays store.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredGrid {
    Rows(Matrix<Cell>),
    Indexed(BTreeMap<String, BTreeMap<String, Cell>>),
}

impl StoredGrid {
    fn into_grid(self, rows: usize, cols: usize) -> FarmGrid {
        match self {
            StoredGrid::Rows(cells) => FarmGrid::from_rows(rows, cols, cells),
            StoredGrid::Indexed(indexed) => {
                let mut cells: Matrix<Cell> = vec![vec![None; cols]; rows];
                for (r, row) in indexed {
                    let Ok(r) = r.parse::<usize>() else { continue };
                    if r >= rows {
                        continue;
                    }
                    for (c, cell) in row {
                        if let Ok(c) = c.parse::<usize>() {
                            if c < cols {
                                cells[r][c] = cell;
                            }
                        }
                    }
                }
                FarmGrid::from_rows(rows, cols, cells)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLayout {
    rows: Option<usize>,
    cols: Option<usize>,
    grid: Option<StoredGrid>,
    saved_at: Option<DateTime<Utc>>,
}

/// A layout read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLayout {
    pub grid: FarmGrid,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Saves and loads farm layouts keyed by username.
#[derive(Clone)]
pub struct LayoutPersistence {
    store: Arc<dyn DocumentStore>,
}

impl LayoutPersistence {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Overwrites whatever was saved for `user`. Returns the save timestamp.
    pub async fn save(&self, user: &str, grid: &FarmGrid) -> Result<DateTime<Utc>, StorageError> {
        if user.is_empty() {
            return Err(StorageError::MissingUser);
        }
        let saved_at = Utc::now();
        let layout = SavedLayout {
            rows: grid.rows(),
            cols: grid.cols(),
            grid: grid.cells(),
            saved_at,
        };
        match write_json(self.store.as_ref(), LAYOUT_COLLECTION, user, &layout).await {
            Ok(()) => {
                info!(
                    "saved {}x{} layout for '{user}' ({} plots planted)",
                    grid.rows(),
                    grid.cols(),
                    grid.occupied_count()
                );
                Ok(saved_at)
            }
            Err(err) => {
                warn!("saving layout for '{user}' failed: {err}");
                Err(err)
            }
        }
    }

    /// Most recently saved layout for `user`, or `None` when nothing usable was
    /// ever saved.
    pub async fn load(&self, user: &str) -> Result<Option<LoadedLayout>, StorageError> {
        if user.is_empty() {
            return Err(StorageError::MissingUser);
        }
        let stored: Option<StoredLayout> =
            match read_json(self.store.as_ref(), LAYOUT_COLLECTION, user).await {
                Ok(stored) => stored,
                Err(err) => {
                    warn!("loading layout for '{user}' failed: {err}");
                    return Err(err);
                }
            };
        let Some(stored) = stored else {
            info!("no saved layout for '{user}'");
            return Ok(None);
        };
        let (rows, cols, grid) = match (stored.rows, stored.cols, stored.grid) {
            (Some(rows), Some(cols), Some(grid)) if rows > 0 && cols > 0 => (rows, cols, grid),
            _ => {
                warn!("saved layout for '{user}' is incomplete, ignoring it");
                return Ok(None);
            }
        };
        let (rows, cols) = match (clamp_dimension(rows), clamp_dimension(cols)) {
            (r, c) if (r, c) != (rows, cols) => {
                warn!("saved layout for '{user}' is {rows}x{cols}, loading it as {r}x{c}");
                (r, c)
            }
            dims => dims,
        };
        info!("loaded {rows}x{cols} layout for '{user}'");
        Ok(Some(LoadedLayout {
            grid: grid.into_grid(rows, cols),
            saved_at: stored.saved_at,
        }))
    }
}
