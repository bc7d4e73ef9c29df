use actix_web::{delete, get, http::Method, post, put, web, HttpResponse};

use crate::{
    api::{error::ApiError, identity::UserKey},
    models::{
        request::{links, ApiResponse, Links, PaginatedResponse},
        yields::{YieldEntry, YieldForm},
    },
    state::AppState,
};

fn entry_links(id: &str) -> Links {
    links([
        ("self", format!("/api/yields/{id}"), Method::PUT),
        ("delete", format!("/api/yields/{id}"), Method::DELETE),
        ("collection", "/api/yields".into(), Method::GET),
    ])
}

fn entry_response(entry: YieldEntry) -> ApiResponse<YieldEntry> {
    let links = entry_links(&entry.id);
    ApiResponse::new(entry, links)
}

/// GET /api/yields
/// The caller's harvests, newest first.
#[utoipa::path(
    context_path = "/api",
    tag = "yields",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses(
        (status = 200, description = "Harvest log", body = YieldListResponse),
        (status = 503, description = "Storage unreachable", body = ErrorResponse),
    )
)]
#[get("/yields")]
pub async fn list_yields(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let entries = state.yields.list(user.as_str()).await?;
    let collection_links = links([
        ("self", "/api/yields".into(), Method::GET),
        ("add", "/api/yields".into(), Method::POST),
        ("totals", "/api/yields/totals".into(), Method::GET),
    ]);
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(entries, collection_links)))
}

/// GET /api/yields/totals
/// Harvested amount per crop.
#[utoipa::path(
    context_path = "/api",
    tag = "yields",
    params(("x-user" = String, Header, description = "Username of the caller")),
    responses((status = 200, description = "Totals per crop", body = CropTotalListResponse))
)]
#[get("/yields/totals")]
pub async fn yield_totals(
    state: web::Data<AppState>,
    user: UserKey,
) -> Result<HttpResponse, ApiError> {
    let totals = state.yields.totals(user.as_str()).await?;
    let links = links([
        ("self", "/api/yields/totals".into(), Method::GET),
        ("collection", "/api/yields".into(), Method::GET),
    ]);
    Ok(HttpResponse::Ok().json(PaginatedResponse::new(totals, links)))
}

/// POST /api/yields
#[utoipa::path(
    context_path = "/api",
    tag = "yields",
    params(("x-user" = String, Header, description = "Username of the caller")),
    request_body = YieldForm,
    responses(
        (status = 201, description = "Harvest recorded", body = YieldApiResponse),
        (status = 422, description = "Invalid crop or yield", body = ErrorResponse),
    )
)]
#[post("/yields")]
pub async fn add_yield(
    state: web::Data<AppState>,
    user: UserKey,
    body: web::Json<YieldForm>,
) -> Result<HttpResponse, ApiError> {
    let entry = state.yields.add(user.as_str(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(entry_response(entry)))
}

/// PUT /api/yields/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "yields",
    params(
        ("x-user" = String, Header, description = "Username of the caller"),
        ("id" = String, Path, description = "Yield entry id"),
    ),
    request_body = YieldForm,
    responses(
        (status = 200, description = "Harvest updated", body = YieldApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
#[put("/yields/{id}")]
pub async fn update_yield(
    state: web::Data<AppState>,
    user: UserKey,
    path: web::Path<String>,
    body: web::Json<YieldForm>,
) -> Result<HttpResponse, ApiError> {
    let entry = state
        .yields
        .update(user.as_str(), &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(entry_response(entry)))
}

/// DELETE /api/yields/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "yields",
    params(
        ("x-user" = String, Header, description = "Username of the caller"),
        ("id" = String, Path, description = "Yield entry id"),
    ),
    responses(
        (status = 200, description = "Harvest removed", body = YieldApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
#[delete("/yields/{id}")]
pub async fn delete_yield(
    state: web::Data<AppState>,
    user: UserKey,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let entry = state.yields.delete(user.as_str(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entry_response(entry)))
}
