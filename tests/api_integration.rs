use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use farmgrid::{
    api::routes::{configure, json_config},
    state::AppState,
    storage::{DocumentStore, MemoryDocumentStore, StorageError, LAYOUT_COLLECTION},
};

async fn memory_state() -> web::Data<AppState> {
    let state = AppState::open(Arc::new(MemoryDocumentStore::default()))
        .await
        .expect("memory store never fails");
    web::Data::new(state)
}

fn build_app(
    state: web::Data<AppState>,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .configure(configure)
}

/// Layout writes fail as if the network were down; everything else is kept in memory.
#[derive(Default)]
struct LayoutWritesOffline {
    inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for LayoutWritesOffline {
    async fn put(
        &self,
        collection: &str,
        key: &str,
        document: serde_json::Value,
    ) -> Result<(), StorageError> {
        if collection == LAYOUT_COLLECTION {
            return Err(StorageError::unavailable("network unreachable"));
        }
        self.inner.put(collection, key, document).await
    }

    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StorageError> {
        self.inner.get(collection, key).await
    }
}

/// Every call fails as if the network were down.
struct OfflineStore;

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn put(&self, _: &str, _: &str, _: serde_json::Value) -> Result<(), StorageError> {
        Err(StorageError::unavailable("network unreachable"))
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Err(StorageError::unavailable("network unreachable"))
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_layout_without_user_returns_401() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get().uri("/api/layout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_blank_user_returns_401() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get()
        .uri("/api/layout")
        .insert_header(("x-user", "   "))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["kind"], "missing_user");
}

// ---------------------------------------------------------------------------
// GET /api/layout
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_get_layout_default_grid() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get()
        .uri("/api/layout")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let layout = &body["payload"];
    assert_eq!(layout["rows"], 8);
    assert_eq!(layout["cols"], 12);
    assert_eq!(layout["mode"], "add");
    assert_eq!(layout["grid"].as_array().unwrap().len(), 8);
    assert_eq!(layout["grid"][0].as_array().unwrap().len(), 12);
    assert_eq!(layout["canUndo"], false);
    assert_eq!(layout["template"]["type"], "Vegetable");
    assert!(body["_links"]["save"]["href"].is_string());
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_click_empty_cell_places_template() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/cells/1/2")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["result"]["outcome"], "placed");
    assert_eq!(
        body["payload"]["layout"]["grid"][1][2]["name"],
        "Heirloom Tomato"
    );
    assert_eq!(body["payload"]["layout"]["canUndo"], true);
}

#[actix_web::test]
async fn test_click_with_incomplete_template_returns_422() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/layout/template")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "name": "",
            "description": "No name",
            "type": "Herb",
            "color": "#A78BFA"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/layout/cells/0/0")
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "validation");
    assert_eq!(body["field"], "name");
}

#[actix_web::test]
async fn test_unknown_plant_type_returns_400() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/layout/template")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "name": "Oak",
            "description": "A tree",
            "type": "Tree",
            "color": "#A78BFA"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_dimensions_are_clamped() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/layout/dimensions")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({ "rows": 1, "cols": 50 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["rows"], 4);
    assert_eq!(body["payload"]["cols"], 20);
}

#[actix_web::test]
async fn test_bulk_delete_without_selection_returns_400() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/bulk-delete")
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "empty_selection");
}

#[actix_web::test]
async fn test_invalid_mode_returns_400() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/layout/mode")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({ "mode": "paint" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_malformed_json_returns_400() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/layout/dimensions")
        .insert_header(("x-user", "alice"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{invalid json}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_users_have_separate_layouts() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/cells/0/0")
        .insert_header(("x-user", "alice"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/layout")
        .insert_header(("x-user", "bob"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["payload"]["grid"][0][0].is_null());
}

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_load_without_save_starts_fresh() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/load")
        .insert_header(("x-user", "newcomer"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["payload"]["restored"], false);
    assert_eq!(body["payload"]["layout"]["rows"], 8);
}

#[actix_web::test]
async fn test_save_returns_timestamp() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/save")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["payload"]["savedAt"].is_string());
}

#[actix_web::test]
async fn test_unreachable_store_on_save_returns_503_and_keeps_edits() {
    let state = web::Data::new(AppState::open(Arc::new(LayoutWritesOffline::default())).await.unwrap());
    let app = test::init_service(build_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/layout/cells/3/3")
        .insert_header(("x-user", "alice"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/layout/save")
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "storage_unavailable");

    let req = test::TestRequest::get()
        .uri("/api/layout")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["grid"][3][3]["name"], "Heirloom Tomato");
    assert_eq!(body["payload"]["saving"], false);
}

#[actix_web::test]
async fn test_unreachable_store_on_load_is_not_not_found() {
    let store = Arc::new(MemoryDocumentStore::default());
    let state = AppState::open(store).await.unwrap();
    // The catalog is opened up front; the layout backend then goes offline.
    let offline = AppState {
        layouts: farmgrid::logic::session::LayoutService::new(
            farmgrid::storage::LayoutPersistence::new(Arc::new(OfflineStore)),
        ),
        ..state
    };
    let app = test::init_service(build_app(web::Data::new(offline))).await;
    let req = test::TestRequest::post()
        .uri("/api/layout/load")
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

// ---------------------------------------------------------------------------
// Plant catalog
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_list_plants_returns_seed() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get().uri("/api/plants").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"].as_array().unwrap().len(), 6);
    assert_eq!(body["pagination"]["total"], 6);
    for item in body["payload"].as_array().unwrap() {
        assert!(item.get("id").is_some(), "Each plant must have an 'id' field");
        assert!(item.get("name").is_some(), "Each plant must have a 'name' field");
        assert!(item.get("aiHint").is_some(), "Seed plants carry an 'aiHint'");
    }
}

#[actix_web::test]
async fn test_search_plants() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get()
        .uri("/api/plants?search=LAVENDER")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let items = body["payload"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Lavender");
}

#[actix_web::test]
async fn test_get_unknown_plant_returns_404() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get().uri("/api/plants/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let error_msg = body.get("error").and_then(|v| v.as_str()).unwrap_or("");
    assert!(!error_msg.is_empty(), "An error message must be returned for an unknown id");
}

#[actix_web::test]
async fn test_add_plant_then_fetch() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/plants")
        .set_json(serde_json::json!({ "name": "Rosemary", "type": "Herb" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/plants/{id}"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["name"], "Rosemary");
    assert_eq!(body["payload"]["type"], "Herb");
}

#[actix_web::test]
async fn test_add_plant_short_name_returns_422() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/plants")
        .set_json(serde_json::json!({ "name": "R" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
}

#[actix_web::test]
async fn test_replace_plant_image() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::put()
        .uri("/api/plants/1/image")
        .set_json(serde_json::json!({ "image": "data:image/png;base64,AAAA" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["image"], "data:image/png;base64,AAAA");
}

// ---------------------------------------------------------------------------
// Yield tracker
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_yield_crud() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/yields")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "crop": "Tomato",
            "yield": 12.5,
            "harvestDate": "2024-08-01",
            "notes": "First flush"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/yields/{id}"))
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "crop": "Tomato",
            "yield": 14.0,
            "harvestDate": "2024-08-02"
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["yield"], 14.0);

    let req = test::TestRequest::get()
        .uri("/api/yields/totals")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"][0]["crop"], "Tomato");
    assert_eq!(body["payload"][0]["total"], 14.0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/yields/{id}"))
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/yields")
        .insert_header(("x-user", "alice"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["payload"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_yield_validation_returns_422() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/yields")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "crop": "Tomato",
            "yield": 0.0,
            "harvestDate": "2024-08-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "yield");
}

#[actix_web::test]
async fn test_delete_unknown_yield_returns_404() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::delete()
        .uri("/api/yields/missing")
        .insert_header(("x-user", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

// ---------------------------------------------------------------------------
// Discussion
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_list_posts_returns_welcome_threads() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let posts = body["payload"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1]["replies"][0]["author"]["username"], "FarmManager");
}

#[actix_web::test]
async fn test_create_post_and_reply() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({
            "title": "Companion planting",
            "content": "Which herbs do you grow next to tomatoes?"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["payload"]["author"]["username"], "alice");

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{id}/replies"))
        .insert_header(("x-user", "bob"))
        .set_json(serde_json::json!({ "content": "Basil, always." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["payload"]["replies"][0]["author"]["username"], "bob");

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"][0]["id"], id.as_str());
    assert_eq!(body["payload"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_create_post_requires_user() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(serde_json::json!({
            "title": "Companion planting",
            "content": "Which herbs do you grow next to tomatoes?"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_short_post_title_returns_422() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({ "title": "Hi", "content": "Long enough content here." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "title");
}

#[actix_web::test]
async fn test_empty_reply_returns_422_and_unknown_thread_404() {
    let app = test::init_service(build_app(memory_state().await)).await;
    let req = test::TestRequest::post()
        .uri("/api/posts/demo-post-1/replies")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let req = test::TestRequest::post()
        .uri("/api/posts/missing/replies")
        .insert_header(("x-user", "alice"))
        .set_json(serde_json::json!({ "content": "Anyone?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
