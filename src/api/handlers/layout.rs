use actix_web::{get, http::Method, post, put, web, HttpResponse};

use crate::{
    api::{error::ApiError, identity::UserKey},
    logic::{
        editor::LayoutEditor,
        session::{EditorSession, LoadStatus},
    },
    models::{
        plant::PlantTemplate,
        request::{
            links, ApiResponse, CellClickResponse, DimensionsRequest, HistoryMoveResponse,
            LayoutView, Links, LoadResponse, ModeRequest, PendingResponse, SaveResponse,
        },
    },
    state::AppState,
};

fn layout_links() -> Links {
    links([
        ("self", "/api/layout".into(), Method::GET),
        ("load", "/api/layout/load".into(), Method::POST),
        ("save", "/api/layout/save".into(), Method::POST),
        ("undo", "/api/layout/undo".into(), Method::POST),
        ("redo", "/api/layout/redo".into(), Method::POST),
    ])
}

fn view(session: &EditorSession, editor: &LayoutEditor) -> LayoutView {
    LayoutView::from_editor(editor, session.is_saving())
}

fn ok<T: serde::Serialize>(payload: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::new(payload, layout_links()))
}

/// GET /api/layout
/// Returns the caller's editor state, starting a default session if needed.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses(
        (status = 200, description = "Current editor state", body = LayoutApiResponse),
        (status = 401, description = "Missing X-User header", body = ErrorResponse),
    )
)]
#[get("/layout")]
pub async fn get_layout(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let editor = session.editor().await;
    Ok(ok(view(&session, &editor)))
}

/// POST /api/layout/load
/// Replaces the editor state with the saved layout, or a fresh grid when none exists.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses(
        (status = 200, description = "Layout loaded", body = LoadApiResponse),
        (status = 503, description = "Storage unreachable, retry later", body = ErrorResponse),
    )
)]
#[post("/layout/load")]
pub async fn load_layout(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let status = state.layouts.load(user.as_str()).await?;
    let session = state.layouts.session(user.as_str()).await;
    let editor = session.editor().await;
    Ok(ok(LoadResponse {
        restored: status == LoadStatus::Restored,
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/save
/// Saves the current grid, overwriting the previous save.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses(
        (status = 200, description = "Layout saved", body = SaveApiResponse),
        (status = 409, description = "Another save is still running", body = ErrorResponse),
        (status = 503, description = "Storage unreachable, edits are kept in memory", body = ErrorResponse),
    )
)]
#[post("/layout/save")]
pub async fn save_layout(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let saved_at = state.layouts.save(user.as_str()).await?;
    Ok(ok(SaveResponse { saved_at }))
}

/// PUT /api/layout/dimensions
/// Resizes the grid (each side clamped to 4..=20). Clears the undo history.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    request_body = DimensionsRequest,
    responses((status = 200, description = "Grid resized", body = LayoutApiResponse))
)]
#[put("/layout/dimensions")]
pub async fn put_dimensions(
    state: web::Data<AppState>,
    user: UserKey,
    body: web::Json<DimensionsRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    editor.set_dimensions(body.rows, body.cols);
    Ok(ok(view(&session, &editor)))
}

/// PUT /api/layout/mode
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    request_body = ModeRequest,
    responses((status = 200, description = "Mode changed, selection cleared", body = LayoutApiResponse))
)]
#[put("/layout/mode")]
pub async fn put_mode(
    state: web::Data<AppState>,
    user: UserKey,
    body: web::Json<ModeRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    editor.set_mode(body.mode);
    Ok(ok(view(&session, &editor)))
}

/// PUT /api/layout/template
/// Sets the plant placed by clicks in Add mode.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    request_body = PlantTemplate,
    responses((status = 200, description = "Template stored", body = LayoutApiResponse))
)]
#[put("/layout/template")]
pub async fn put_template(
    state: web::Data<AppState>,
    user: UserKey,
    body: web::Json<PlantTemplate>,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    editor.set_template(body.into_inner());
    Ok(ok(view(&session, &editor)))
}

/// POST /api/layout/cells/{row}/{col}
/// Clicks a plot; the effect depends on the current mode.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(
        ("x-user" = String, Header, description = "Username of the caller"),
        ("row" = usize, Path, description = "Zero-based row"),
        ("col" = usize, Path, description = "Zero-based column"),
    ),
    responses(
        (status = 200, description = "Click handled", body = CellClickApiResponse),
        (status = 422, description = "Current plant template is incomplete", body = ErrorResponse),
    )
)]
#[post("/layout/cells/{row}/{col}")]
pub async fn click_cell(
    state: web::Data<AppState>,
    user: UserKey,
    path: web::Path<(usize, usize)>,
) -> Result<HttpResponse, ApiError> {
    let (row, col) = path.into_inner();
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let result = editor.click_cell(row, col)?;
    Ok(ok(CellClickResponse {
        result,
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/bulk-delete
/// Asks to clear every selected plot; must be confirmed.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses(
        (status = 200, description = "Confirmation pending", body = PendingApiResponse),
        (status = 400, description = "Nothing is selected", body = ErrorResponse),
    )
)]
#[post("/layout/bulk-delete")]
pub async fn request_bulk_delete(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let action = editor.request_bulk_delete()?;
    Ok(ok(PendingResponse {
        action: Some(action),
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/confirm
/// Applies the pending removal or bulk delete. `action` is absent when nothing was pending.
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses((status = 200, description = "Pending action applied", body = PendingApiResponse))
)]
#[post("/layout/confirm")]
pub async fn confirm(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let action = editor.confirm();
    Ok(ok(PendingResponse {
        action,
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/cancel
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses((status = 200, description = "Pending action dropped", body = PendingApiResponse))
)]
#[post("/layout/cancel")]
pub async fn cancel(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let action = editor.cancel();
    Ok(ok(PendingResponse {
        action,
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/undo
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses((status = 200, description = "History moved back, if possible", body = HistoryMoveApiResponse))
)]
#[post("/layout/undo")]
pub async fn undo(state: web::Data<AppState>, user: UserKey) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let moved = editor.undo();
    Ok(ok(HistoryMoveResponse {
        moved,
        layout: view(&session, &editor),
    }))
}

/// POST /api/layout/redo
#[utoipa::path(
    context_path = "/api",
    tag = "layout",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses((status = 200, description = "History moved forward, if possible", body = HistoryMoveApiResponse))
)]
#[post("/layout/redo")]
pub async fn redo(state: web::Data<AppState>, user: UserKey) -> Result<HttpResponse, ApiError> {
    let session = state.layouts.session(user.as_str()).await;
    let mut editor = session.editor().await;
    let moved = editor.redo();
    Ok(ok(HistoryMoveResponse {
        moved,
        layout: view(&session, &editor),
    }))
}
