//! Health check for the deployment.
//!
//! Only the stored-price and post endpoints need PostgreSQL; `/api/rates`
//! keeps answering from upstream or the canned quotes while the database is
//! down. A failing health check therefore means "admin edits and stored
//! prices are unavailable", not "the site is dark".

use crate::{db::DbPool, error::AppError};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub checked_at: DateTime<Utc>,
}

/// `GET /health`: 200 once a pooled connection answers `SELECT 1`.
///
/// ```json
/// { "status": "ok", "database": "reachable", "checked_at": "2026-03-02T08:15:00Z" }
/// ```
///
/// A database failure goes through [`AppError::Database`]: 500 with the
/// `internal_error` envelope, details logged server-side only.
pub async fn health_check(State(pool): State<DbPool>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        database: "reachable",
        checked_at: Utc::now(),
    }))
}
