//! Contact links for the home page.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::config::{Config, SocialLinks};

/// `GET /api/v1/social`
pub async fn get_social_links(State(config): State<Arc<Config>>) -> Json<SocialLinks> {
    Json(config.social_links())
}
