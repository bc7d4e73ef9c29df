use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    error::{EditorError, RecordError},
    models::request::ErrorResponse,
    storage::StorageError,
};

/// Every failure a handler can return, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or empty X-User header")]
    MissingUser,
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl ApiError {
    fn storage(&self) -> Option<&StorageError> {
        match self {
            ApiError::Editor(EditorError::Storage(err))
            | ApiError::Record(RecordError::Storage(err)) => Some(err),
            _ => None,
        }
    }

    /// Stable category clients can switch on (retry vs. fix input vs. proceed).
    pub fn kind(&self) -> &'static str {
        if let Some(err) = self.storage() {
            return match err {
                StorageError::MissingUser => "missing_user",
                StorageError::Unavailable { .. } => "storage_unavailable",
                StorageError::Malformed(_) => "storage_malformed",
            };
        }
        match self {
            ApiError::MissingUser => "missing_user",
            ApiError::Editor(EditorError::Validation(_))
            | ApiError::Record(RecordError::Validation(_)) => "validation",
            ApiError::Editor(EditorError::EmptySelection) => "empty_selection",
            ApiError::Editor(EditorError::SaveInProgress) => "save_in_progress",
            ApiError::Record(RecordError::NotFound { .. }) => "not_found",
            _ => "internal",
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            ApiError::Editor(EditorError::Validation(v))
            | ApiError::Record(RecordError::Validation(v)) => Some(v.field.to_string()),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            "missing_user" => StatusCode::UNAUTHORIZED,
            "validation" => StatusCode::UNPROCESSABLE_ENTITY,
            "empty_selection" => StatusCode::BAD_REQUEST,
            "save_in_progress" => StatusCode::CONFLICT,
            "not_found" => StatusCode::NOT_FOUND,
            "storage_unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
            field: self.field(),
        })
    }
}
