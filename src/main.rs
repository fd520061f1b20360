use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use std::io;

mod config;
mod db;
mod errors;
mod models;
mod routes;

use config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!("Server running at http://{}", config.server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(routes::routes::json_config())
            .app_data(routes::routes::path_config())
            .configure(routes::routes::inventory_configure)
    })
    .bind(&config.server_address)?
    .run()
    .await
}
