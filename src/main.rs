// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! De Kast gym API server
//!
//! Serves the booking, subscription and login flow of the member app to
//! the UI shell over a local JSON API.

use anyhow::Context;
use dekast_gym::{
    config::Config,
    db::FirestoreDb,
    navigation::RecordingNavigator,
    storage::{self, SqliteStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting De Kast gym API");

    // Open the local store
    let pool = storage::sqlite::create_pool(&config.database_url)
        .context("Failed to open local database")?;
    storage::migrations::run_migrations(&pool).context("Failed to run migrations")?;
    let store = Arc::new(SqliteStore::new(pool));
    tracing::info!(database = %config.database_url, "Local store ready");

    // Connect to Firestore when a project is configured
    let db = match config.gcp_project_id.as_deref() {
        Some(project_id) => FirestoreDb::new(project_id)
            .await
            .context("Failed to connect to Firestore")?,
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, remote store offline");
            FirestoreDb::new_mock()
        }
    };

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store, db));

    // Resolve the startup screen
    let nav = RecordingNavigator::new();
    let status = state.auth_gate.start(&nav).await;
    tracing::info!(
        status = ?status,
        route = nav.last().map(|r| r.as_str()),
        "Startup screen resolved"
    );

    // Build router
    let app = dekast_gym::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dekast_gym=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
