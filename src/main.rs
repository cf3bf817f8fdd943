use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use globetrotter::config::ServerConfig;
use globetrotter::routes;
use globetrotter::services::itinerary_store::ItineraryStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = web::Data::new(ItineraryStore::new());

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
