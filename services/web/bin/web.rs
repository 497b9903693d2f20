//! Main Entrypoint for the Askwell Web Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Building the Appwrite client handles, degrading to stubs when needed.
//! 3. Compiling the page templates.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use askwell_core::{build_clients, default_sdk};
use askwell_web::{config::Config, router::create_router, state::AppState, templates};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!(appwrite = ?config.appwrite, mode = ?config.mode, "Configuration loaded.");

    // --- 3. Initialize Backend Clients ---
    let sdk = default_sdk();
    let clients = build_clients(&config.appwrite, sdk.as_deref(), config.mode);

    // --- 4. Compile Templates ---
    let templates = templates::registry().context("Failed to compile templates")?;

    let bind_address = config.bind_address;
    let app_state = Arc::new(AppState::new(config, clients, templates));

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(bind_address = %bind_address, "Service configured. Starting server...");
    let listener = tokio::net::TcpListener::bind(bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
