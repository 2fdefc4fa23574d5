//! API Key model for authentication.
//!
//! Admin tokens are stored in the `api_keys` table as SHA-256 hashes. A key
//! without the admin flag authenticates but cannot reach the admin routes.

use uuid::Uuid;

/// The columns of an active `api_keys` row needed to authorize a request.
///
/// # Database Table
///
/// `api_keys` also carries `key_hash` (hex SHA-256 of the token, used for the
/// lookup), `is_active` (inactive keys are never loaded) and `created_at`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    pub id: Uuid,

    /// Who the key was issued to
    pub display_name: String,

    /// Whether the key may manage posts and prices
    pub is_admin: bool,
}
