// SPDX-License-Identifier: MIT

//! Courtdesk API Server
//!
//! Backend for the tennis tournament administration dashboard: a role-aware
//! user directory where admins manage multi-role users (Coach, Referee,
//! Player, Super Admin) with role-specific profile data.

use courtdesk::{config::Config, directory::UserDirectory, store::JsonFileStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Courtdesk API");

    // Open the backing store and load the directory
    let store = JsonFileStore::new(&config.data_dir).expect("Failed to open data directory");
    let directory =
        UserDirectory::load(Arc::new(store)).expect("Failed to load user directory");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        directory,
    });

    // Build router
    let app = courtdesk::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courtdesk=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
