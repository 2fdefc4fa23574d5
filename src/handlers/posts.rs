//! Post HTTP handlers.
//!
//! - GET /api/v1/posts - latest published posts (public)
//! - GET /api/v1/admin/posts - all posts including drafts
//! - POST /api/v1/admin/posts - create a draft
//! - PATCH /api/v1/admin/posts/{id} - partial update
//! - DELETE /api/v1/admin/posts/{id} - delete

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::post::{CreatePostRequest, Post, UpdatePostRequest},
    services::post_service,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Latest published posts for the home page, newest first (at most 5).
pub async fn list_published_posts(State(pool): State<DbPool>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(post_service::list_published(&pool).await?))
}

/// Every post, drafts included, newest first.
pub async fn list_all_posts(State(pool): State<DbPool>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(post_service::list_all(&pool).await?))
}

/// Create a draft post.
///
/// # Request Body
///
/// ```json
/// { "title": "Gold up again", "content": "16 Pae Yae crossed 6.4M today." }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the stored post, `published` is `false`
/// - **Error (400)**: blank title or content
pub async fn create_post(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = post_service::create(&pool, request).await?;
    tracing::debug!("Post {} created by {}", post.id, auth.display_name);

    Ok((StatusCode::CREATED, Json(post)))
}

/// Partially update a post; also used to publish or unpublish.
///
/// # Request Body
///
/// Any subset of the fields:
///
/// ```json
/// { "title": "New title", "content": "New body", "published": true }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the post as stored after the update
/// - **Error (404)**: no such post
pub async fn update_post(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let post = post_service::update(&pool, post_id, request).await?;
    tracing::debug!("Post {} updated by {}", post.id, auth.display_name);

    Ok(Json(post))
}

/// Delete a post. Returns 204 No Content, or 404 if it does not exist.
pub async fn delete_post(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    post_service::delete(&pool, post_id).await?;
    tracing::debug!("Post {} deleted by {}", post_id, auth.display_name);

    Ok(StatusCode::NO_CONTENT)
}
