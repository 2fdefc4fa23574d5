//! Post data models and API request/response types.
//!
//! Posts are short announcements shown on the home page. Admins create them
//! as drafts and publish them by flipping the `published` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Represents a row of the `posts` table.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "title": "USD rate update",
///   "content": "Rates moved up this morning.",
///   "published": true,
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a post.
///
/// New posts always start unpublished.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("Title", &self.title)?;
        require_text("Content", &self.content)
    }
}

/// Request body for a partial post update.
///
/// Fields that are absent keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_none() && self.content.is_none() && self.published.is_none() {
            return Err(AppError::InvalidRequest(
                "At least one field must be provided".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            require_text("Title", title)?;
        }
        if let Some(content) = &self.content {
            require_text("Content", content)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(())
}
