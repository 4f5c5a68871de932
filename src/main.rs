//! # HTTP Lite Server - Entry Point
//! src/main.rs
//!
//! Parsea los argumentos, inicializa el logging y arranca el servidor.

use http_lite_server::config::Config;
use http_lite_server::error::ServerError;
use http_lite_server::server::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::new();

    // El filtro sale del CLI, no de RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_thread_names(true)
        .init();

    if let Err(e) = start(config) {
        error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}

fn start(config: Config) -> Result<(), ServerError> {
    config.validate().map_err(ServerError::InvalidConfig)?;

    info!(
        address = %config.address(),
        directory = %config.directory,
        max_header_bytes = config.max_header_bytes,
        max_body_bytes = config.max_body_bytes,
        "configuración"
    );

    let server = Server::bind(config)?;
    server.run()
}
