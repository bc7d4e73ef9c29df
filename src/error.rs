use thiserror::Error;

use crate::{models::plant::ValidationError, storage::StorageError};

/// Failures surfaced by the layout editor and its session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid plant template: {0}")]
    Validation(#[from] ValidationError),
    #[error("no plots are selected")]
    EmptySelection,
    #[error("a save is already in progress")]
    SaveInProgress,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures of the catalog and yield ledgers.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
