//! RAX Auth Server - Entry Point
//!
//! Serves the login/registration pipeline over a line-based control protocol.

use log::{error, info};

use rax_auth_server::config::ServerConfig;
use rax_auth_server::error::ServerError;
use rax_auth_server::error::handlers::handle_error;
use rax_auth_server::logging::setup_logging;
use rax_auth_server::Server;

#[tokio::main]
async fn main() {
    setup_logging();

    info!("Launching auth server...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let server = Server::new(config).await?;
    server.start().await;
    Ok(())
}
