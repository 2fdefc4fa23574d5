//! Shared application state handed to every handler.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, db::DbPool, services::rate_fetcher::RateFetcher};

/// Immutable state cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub fetcher: RateFetcher,
    pub config: Arc<Config>,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for RateFetcher {
    fn from_ref(state: &AppState) -> Self {
        state.fetcher.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
