//! MMK Today - Main Application Entry Point
//!
//! REST server behind the MMK Today site: Myanmar Kyat exchange rates, gold
//! prices and short announcements. Live rates are fetched from upstream
//! sources with a fallback to canned quotes; stored rates, gold prices and
//! posts live in PostgreSQL and are edited through admin-only endpoints.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Upstream**: reqwest for the CBM JSON API, scraper for the HelloLinker page
//! - **Authentication**: bearer token with SHA-256 hashing and an admin flag
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations and seed default prices
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod app;
mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{services::rate_fetcher::RateFetcher, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    services::price_service::seed_defaults(&pool).await?;
    tracing::info!("Default prices seeded");

    let fetcher = RateFetcher::from_config(&config)?;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let app = app::build_router(AppState {
        pool,
        fetcher,
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
