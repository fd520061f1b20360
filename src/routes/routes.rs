use actix_web::web;

use super::inventory::inventory_handlers;
use crate::errors::InventoryError;

// Malformed bodies get the same JSON error shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| InventoryError::BadRequest(err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| InventoryError::BadRequest(err.to_string()).into())
}

pub fn inventory_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(inventory_handlers::index))
        .service(
            web::scope("/api")
                .route("/data", web::get().to(inventory_handlers::get_data))
                .route("/group", web::post().to(inventory_handlers::upsert_group))
                .route("/model", web::post().to(inventory_handlers::upsert_model))
                .route("/item", web::post().to(inventory_handlers::upsert_item))
                .route("/item/adjust", web::post().to(inventory_handlers::adjust_item))
                .route("/delete/{kind}/{id}", web::delete().to(inventory_handlers::delete_entry))
                .route("/low-stock", web::get().to(inventory_handlers::low_stock)),
        );
}
