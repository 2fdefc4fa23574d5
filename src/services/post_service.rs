//! Post service - storage operations for home page announcements.
//!
//! Every write returns the stored row so callers can update their view
//! without a second round trip.

use crate::{
    db::DbPool,
    error::AppError,
    models::post::{CreatePostRequest, Post, UpdatePostRequest},
};
use uuid::Uuid;

/// Number of posts shown in the public feed.
pub const FEED_LIMIT: i64 = 5;

/// Published posts, newest first, capped at [`FEED_LIMIT`].
pub async fn list_published(pool: &DbPool) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, published, created_at
        FROM posts
        WHERE published = true
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(FEED_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Every post including drafts, newest first.
pub async fn list_all(pool: &DbPool) -> Result<Vec<Post>, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, published, created_at FROM posts ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Create a draft post.
///
/// # Errors
///
/// - `InvalidRequest`: blank title or content
/// - `Database`: insert failed
pub async fn create(pool: &DbPool, request: CreatePostRequest) -> Result<Post, AppError> {
    request.validate()?;

    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, published)
        VALUES ($1, $2, false)
        RETURNING id, title, content, published, created_at
        "#,
    )
    .bind(request.title.trim())
    .bind(request.content.trim())
    .fetch_one(pool)
    .await?;

    tracing::info!("Created post {}", post.id);
    Ok(post)
}

/// Apply a partial update. Absent fields keep their stored value.
///
/// # Errors
///
/// - `InvalidRequest`: nothing to update, or a blank title/content
/// - `PostNotFound`: no post with this id
pub async fn update(pool: &DbPool, id: Uuid, request: UpdatePostRequest) -> Result<Post, AppError> {
    request.validate()?;

    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            published = COALESCE($4, published)
        WHERE id = $1
        RETURNING id, title, content, published, created_at
        "#,
    )
    .bind(id)
    .bind(request.title.as_deref().map(str::trim))
    .bind(request.content.as_deref().map(str::trim))
    .bind(request.published)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::PostNotFound)?;

    tracing::info!("Updated post {}", post.id);
    Ok(post)
}

/// Delete a post.
///
/// # Errors
///
/// - `PostNotFound`: no post with this id
pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::PostNotFound);
    }

    tracing::info!("Deleted post {}", id);
    Ok(())
}
