use utoipa::OpenApi;

use crate::{
    logic::editor::EditorMode,
    models::{
        catalog::{CatalogPlant, NewCatalogPlant},
        discussion::{Author, NewPost, NewReply, Post, Reply},
        plant::{PlantAssignment, PlantTemplate, PlantType},
        request::{
            CellClickApiResponse, CellClickResponse, CropTotalListResponse, DimensionsRequest,
            ErrorResponse, HistoryMoveApiResponse, HistoryMoveResponse, ImageRequest,
            LayoutApiResponse, LayoutView, Link, LoadApiResponse, LoadResponse, ModeRequest,
            Pagination, PendingApiResponse, PendingResponse, PlantApiResponse,
            PlantListResponse, PostApiResponse, PostListResponse, SaveApiResponse, SaveResponse, YieldApiResponse,
            YieldListResponse,
        },
        yields::{CropTotal, YieldEntry, YieldForm},
        Coordinate,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Farm Grid API",
        description = "Smart-farm backend: edit a plot layout with undo/redo and bulk delete, save it per user, browse the plant catalog, track harvest yields and discuss with other growers.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::layout::get_layout,
        crate::api::handlers::layout::load_layout,
        crate::api::handlers::layout::save_layout,
        crate::api::handlers::layout::put_dimensions,
        crate::api::handlers::layout::put_mode,
        crate::api::handlers::layout::put_template,
        crate::api::handlers::layout::click_cell,
        crate::api::handlers::layout::request_bulk_delete,
        crate::api::handlers::layout::confirm,
        crate::api::handlers::layout::cancel,
        crate::api::handlers::layout::undo,
        crate::api::handlers::layout::redo,
        crate::api::handlers::plants::list_plants,
        crate::api::handlers::plants::get_plant,
        crate::api::handlers::plants::add_plant,
        crate::api::handlers::plants::put_plant_image,
        crate::api::handlers::yields::list_yields,
        crate::api::handlers::yields::yield_totals,
        crate::api::handlers::yields::add_yield,
        crate::api::handlers::yields::update_yield,
        crate::api::handlers::yields::delete_yield,
        crate::api::handlers::posts::list_posts,
        crate::api::handlers::posts::get_post,
        crate::api::handlers::posts::create_post,
        crate::api::handlers::posts::reply_to_post,
    ),
    components(
        schemas(
            // Layout editor
            PlantType, PlantAssignment, PlantTemplate, EditorMode, Coordinate, LayoutView,
            DimensionsRequest, ModeRequest, CellClickResponse, PendingResponse,
            HistoryMoveResponse, LoadResponse, SaveResponse,
            // Catalog
            CatalogPlant, NewCatalogPlant, ImageRequest,
            // Yields
            YieldEntry, YieldForm, CropTotal,
            // Discussion
            Author, Reply, Post, NewPost, NewReply,
            // Shared
            Link, Pagination, ErrorResponse,
            // Concrete response envelopes (via #[aliases])
            LayoutApiResponse,
            CellClickApiResponse,
            PendingApiResponse,
            HistoryMoveApiResponse,
            LoadApiResponse,
            SaveApiResponse,
            PlantApiResponse,
            PlantListResponse,
            YieldApiResponse,
            YieldListResponse,
            CropTotalListResponse,
            PostApiResponse,
            PostListResponse,
        )
    ),
    tags(
        (name = "layout", description = "Farm layout editor: grid, modes, selection, undo/redo, save/load"),
        (name = "plants", description = "Shared plant catalog"),
        (name = "yields", description = "Per-user harvest log"),
        (name = "discussion", description = "Community discussion threads and replies"),
    )
)]
pub struct ApiDoc;
