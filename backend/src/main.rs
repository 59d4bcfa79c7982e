mod analysis;
mod config;
mod error;
mod routes;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use config::ServerConfig;
use routes::{configure_routes, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let bind_address = config.bind_address();
    let max_payload_bytes = config.max_payload_bytes;
    log::info!(
        "Starting server on {} (max payload {} bytes)",
        bind_address,
        max_payload_bytes
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .configure(|cfg| configure_routes(cfg, max_payload_bytes))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
