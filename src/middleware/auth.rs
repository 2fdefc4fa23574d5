//! Admin authentication middleware.
//!
//! This middleware intercepts every admin request to:
//! 1. Extract the bearer token from the Authorization header
//! 2. Hash it and look up an active key
//! 3. Reject non-admin keys with HTTP 403
//! 4. Inject authentication context into the request

use crate::{db::DbPool, error::AppError, models::api_key::ApiKey};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Authentication context attached to admin requests.
///
/// Handlers can extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub api_key_id: Uuid,
    pub display_name: String,
}

/// Hex-encoded SHA-256 digest of a token, as stored in `api_keys.key_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}

/// Decide whether a looked-up key may use the admin routes.
///
/// - No active key → `Unauthorized` (401)
/// - Key without the admin flag → `Forbidden` (403)
pub fn authorize(api_key: Option<ApiKey>) -> Result<AuthContext, AppError> {
    let api_key = api_key.ok_or(AppError::Unauthorized)?;

    if !api_key.is_admin {
        tracing::warn!("Non-admin key {} rejected", api_key.id);
        return Err(AppError::Forbidden);
    }

    Ok(AuthContext {
        api_key_id: api_key.id,
        display_name: api_key.display_name,
    })
}

/// Admin gate.
///
/// # Flow
///
/// 1. Missing or malformed header → 401
/// 2. Hash the token and load the matching active key
/// 3. [`authorize`] the key (401 unknown, 403 non-admin)
/// 4. Inject `AuthContext` and call the next handler
pub async fn require_admin(
    State(pool): State<DbPool>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key_hash = hash_token(bearer_token(&request)?);

    let api_key = sqlx::query_as::<_, ApiKey>(
        "SELECT id, display_name, is_admin
         FROM api_keys
         WHERE key_hash = $1 AND is_active = true",
    )
    .bind(&key_hash)
    .fetch_optional(&pool)
    .await?;

    let auth_context = authorize(api_key)?;
    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}
