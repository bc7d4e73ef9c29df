use actix_web::{error::InternalError, web, HttpResponse};

use crate::{
    api::handlers::{layout, plants, posts, yields},
    models::request::ErrorResponse,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(layout::get_layout)
            .service(layout::load_layout)
            .service(layout::save_layout)
            .service(layout::put_dimensions)
            .service(layout::put_mode)
            .service(layout::put_template)
            .service(layout::click_cell)
            .service(layout::request_bulk_delete)
            .service(layout::confirm)
            .service(layout::cancel)
            .service(layout::undo)
            .service(layout::redo)
            .service(plants::list_plants)
            .service(plants::get_plant)
            .service(plants::add_plant)
            .service(plants::put_plant_image)
            .service(yields::yield_totals)
            .service(yields::list_yields)
            .service(yields::add_yield)
            .service(yields::update_yield)
            .service(yields::delete_yield)
            .service(posts::list_posts)
            .service(posts::get_post)
            .service(posts::create_post)
            .service(posts::reply_to_post),
    );
}

/// JSON extractor config turning body deserialization failures into 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse {
                error: message,
                kind: "bad_request".into(),
                field: None,
            }),
        )
        .into()
    })
}
