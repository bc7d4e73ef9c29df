use actix_web::{get, http::Method, post, put, web, HttpResponse};

use crate::{
    api::error::ApiError,
    error::RecordError,
    models::{
        catalog::{CatalogPlant, NewCatalogPlant},
        request::{links, ApiResponse, CatalogQuery, ImageRequest, Links, PaginatedResponse},
    },
    state::AppState,
};

fn plant_links(id: &str) -> Links {
    links([
        ("self", format!("/api/plants/{id}"), Method::GET),
        ("image", format!("/api/plants/{id}/image"), Method::PUT),
        ("collection", "/api/plants".into(), Method::GET),
    ])
}

fn plant_response(plant: CatalogPlant) -> ApiResponse<CatalogPlant> {
    let links = plant_links(&plant.id);
    ApiResponse::new(plant, links)
}

/// GET /api/plants
/// Lists catalog plants, optionally filtered by a search term.
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    params(CatalogQuery),
    responses((status = 200, description = "Matching plants", body = PlantListResponse))
)]
#[get("/plants")]
pub async fn list_plants(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> HttpResponse {
    let plants = state.catalog.list(query.search.as_deref()).await;
    let collection_links = links([
        ("self", "/api/plants".into(), Method::GET),
        ("add", "/api/plants".into(), Method::POST),
    ]);
    HttpResponse::Ok().json(PaginatedResponse::new(plants, collection_links))
}

/// GET /api/plants/{id}
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    params(("id" = String, Path, description = "Catalog plant id")),
    responses(
        (status = 200, description = "The plant", body = PlantApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
#[get("/plants/{id}")]
pub async fn get_plant(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match state.catalog.get(&id).await {
        Some(plant) => Ok(HttpResponse::Ok().json(plant_response(plant))),
        None => Err(RecordError::NotFound { kind: "plant", id }.into()),
    }
}

/// POST /api/plants
/// Adds a plant to the shared catalog.
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    request_body = NewCatalogPlant,
    responses(
        (status = 201, description = "Plant added", body = PlantApiResponse),
        (status = 422, description = "Name shorter than 2 characters", body = ErrorResponse),
    )
)]
#[post("/plants")]
pub async fn add_plant(
    state: web::Data<AppState>,
    body: web::Json<NewCatalogPlant>,
) -> Result<HttpResponse, ApiError> {
    let plant = state.catalog.add(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(plant_response(plant)))
}

/// PUT /api/plants/{id}/image
#[utoipa::path(
    context_path = "/api",
    tag = "plants",
    params(("id" = String, Path, description = "Catalog plant id")),
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Image replaced", body = PlantApiResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
#[put("/plants/{id}/image")]
pub async fn put_plant_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ImageRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let plant = state.catalog.set_image(&id, body.into_inner().image).await?;
    Ok(HttpResponse::Ok().json(plant_response(plant)))
}
