//! Stored exchange rate and gold price handlers.
//!
//! - GET /api/v1/exchange-rates - stored rates with display metadata
//! - GET /api/v1/gold-prices - stored gold prices
//! - PUT /api/v1/admin/prices - upsert rates and gold prices (admin)

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::{exchange_rate::DisplayRate, gold_price::GoldPrice},
    services::price_service::{self, PriceSnapshot, PriceUpdateRequest},
};
use axum::{Extension, Json, extract::State};

/// List stored exchange rates ordered by currency code.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   {
///     "code": "AED",
///     "currency": "UAE Dirham",
///     "flag": "https://flagsapi.com/AE/flat/64.png",
///     "link": "https://hellolinker.net/rates/exchange-price/aed",
///     "buy": "1207.00",
///     "sell": "1240.00",
///     "updated_at": "2025-12-20T10:00:00Z"
///   }
/// ]
/// ```
pub async fn list_exchange_rates(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<DisplayRate>>, AppError> {
    Ok(Json(price_service::list_exchange_rates(&pool).await?))
}

/// List stored gold prices, world quotes first.
pub async fn list_gold_prices(State(pool): State<DbPool>) -> Result<Json<Vec<GoldPrice>>, AppError> {
    Ok(Json(price_service::list_gold_prices(&pool).await?))
}

/// Upsert exchange rates and gold prices in one transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "rates": [{ "currency": "USD", "buy": "4470.00", "sell": "4570.00" }],
///   "gold_prices": [
///     { "type": "24 Karat", "price": 2750.10, "change": 7.14, "category": "world" }
///   ]
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: the refreshed `rates` and `gold_prices` lists
/// - **Error (400)**: nothing to update or a blank key
/// - **Error (401/403)**: missing token or non-admin caller
pub async fn update_prices(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<PriceUpdateRequest>,
) -> Result<Json<PriceSnapshot>, AppError> {
    tracing::info!("Price update by {} ({})", auth.display_name, auth.api_key_id);
    Ok(Json(price_service::update_prices(&pool, request).await?))
}
