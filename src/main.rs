use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use taskkeeper::config::Config;
use taskkeeper::routes;
use taskkeeper::store::PostgresStore;
use taskkeeper::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let state = if config.uses_memory_store() {
        log::warn!("Using the in-memory store; all data is lost on shutdown");
        AppState::in_memory(&config)
    } else {
        let store = PostgresStore::connect(&config.database_url, config.database_max_connections)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        log::info!("Database connected");
        AppState::postgres(store, &config)
    };
    let state = web::Data::new(state);

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
            .default_service(web::route().to(routes::health::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
