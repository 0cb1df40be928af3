//! Gas Wells API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                         │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                        ││
//! │  │  /health  /wells  /wells/:id                            ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Services Layer                        ││
//! │  │  WellService (validation, pmax calculation)             ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Data Layer                            ││
//! │  │  WellRepository ─► PgWellRepository (PgPool)            ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gas_wells_api::{
    config::Config,
    db::{Database, PgWellRepository},
    routes,
    shutdown::shutdown_signal,
    AppState, WellService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config);

    tracing::info!(environment = ?config.environment, "Starting Gas Wells API Server");

    let db = Database::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database connected"
    );

    db.run_migrations().await?;
    tracing::info!("Migrations completed");

    let repo = PgWellRepository::new(db.pool().clone(), config.database.statement_timeout);
    let wells = WellService::new(Arc::new(repo));

    let db = Arc::new(db);
    let state = AppState {
        db: db.clone(),
        wells: Arc::new(wells),
        config: Arc::new(config.clone()),
    };

    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped gracefully");

    Ok(())
}

/// Text output in development, JSON in production.
/// RUST_LOG=debug,sqlx=warn style filters override the default.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gas_wells_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
