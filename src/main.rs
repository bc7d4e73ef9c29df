use actix_web::{middleware, web, App, HttpServer};
use farmgrid::{
    api::{
        openapi::ApiDoc,
        routes::{configure, json_config},
    },
    config::AppConfig,
    state::AppState,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let state = AppState::open(config.document_store())
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    let bind_addr = config.bind_addr.clone();
    log::info!("🌱 Farm grid API started at http://{bind_addr} ({:?} store)", config.store);
    log::info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    log::info!("   📌 OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(json_config())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
