//! # Server Startup
//!
//! Binds the API router to the configured address and serves it.

use error::Result;
use server::AppState;

use crate::config;

/// Bind and serve the API until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run(host: &str, port: u16, state: AppState) -> Result<()> {
    let addr = config::parse_socket_addr(host, port)
        .map_err(|e| anyhow::anyhow!("Invalid listen address {}:{}: {}", host, port, e))?;

    let app = server::create_app_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

    logging::info!(target: "serve", address = %addr, "API server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
