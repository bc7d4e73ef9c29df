use std::collections::HashMap;

use actix_web::http::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::{IntoParams, ToSchema};

use crate::{
    logic::editor::{ClickOutcome, EditorMode, LayoutEditor, PendingAction},
    models::{
        catalog::CatalogPlant,
        discussion::Post,
        plant::{PlantAssignment, PlantTemplate, PALETTE},
        yields::{CropTotal, YieldEntry},
        Coordinate,
    },
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Builds a `Links` map from `(relation, href, method)` triples.
pub fn links<const N: usize>(entries: [(&str, String, Method); N]) -> Links {
    entries
        .into_iter()
        .map(|(rel, href, method)| (rel.to_string(), link(href, method)))
        .collect()
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// A single page holding everything.
    pub fn single(total: usize) -> Self {
        Self {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        }
    }
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    LayoutApiResponse = ApiResponse<LayoutView>,
    CellClickApiResponse = ApiResponse<CellClickResponse>,
    PendingApiResponse = ApiResponse<PendingResponse>,
    HistoryMoveApiResponse = ApiResponse<HistoryMoveResponse>,
    LoadApiResponse = ApiResponse<LoadResponse>,
    SaveApiResponse = ApiResponse<SaveResponse>,
    PlantApiResponse = ApiResponse<CatalogPlant>,
    YieldApiResponse = ApiResponse<YieldEntry>,
    PostApiResponse = ApiResponse<Post>
)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    PlantListResponse = PaginatedResponse<CatalogPlant>,
    YieldListResponse = PaginatedResponse<YieldEntry>,
    CropTotalListResponse = PaginatedResponse<CropTotal>,
    PostListResponse = PaginatedResponse<Post>
)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links) -> Self {
        let pagination = Pagination::single(payload.len());
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Stable error category, e.g. `validation` or `storage_unavailable`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Everything a client needs to render the layout editor.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<Option<PlantAssignment>>>,
    pub mode: EditorMode,
    pub selection: Vec<Coordinate>,
    pub template: PlantTemplate,
    #[schema(value_type = Object)]
    pub pending: Option<PendingAction>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_length: usize,
    pub history_index: usize,
    pub saving: bool,
    pub palette: Vec<String>,
}

impl LayoutView {
    pub fn from_editor(editor: &LayoutEditor, saving: bool) -> Self {
        let grid = editor.grid();
        let history = editor.history();
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            grid: grid.cells().to_vec(),
            mode: editor.mode(),
            selection: editor.selection().iter().copied().collect(),
            template: editor.template().clone(),
            pending: editor.pending().cloned(),
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            history_length: history.len(),
            history_index: history.index(),
            saving,
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DimensionsRequest {
    /// Clamped to 4..=20.
    pub rows: usize,
    /// Clamped to 4..=20.
    pub cols: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModeRequest {
    pub mode: EditorMode,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CellClickResponse {
    #[schema(value_type = Object)]
    pub result: ClickOutcome,
    pub layout: LayoutView,
}

/// Returned by bulk-delete requests, confirmations and cancellations.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingResponse {
    #[schema(value_type = Object)]
    pub action: Option<PendingAction>,
    pub layout: LayoutView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryMoveResponse {
    /// False when already at the oldest (undo) or newest (redo) entry.
    pub moved: bool,
    pub layout: LayoutView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoadResponse {
    /// False when no saved layout existed and a fresh grid was started.
    pub restored: bool,
    pub layout: LayoutView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImageRequest {
    pub image: String,
}
