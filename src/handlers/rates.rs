//! Live exchange rates.

use axum::{Json, extract::State};

use crate::{models::exchange_rate::ExchangeRate, services::rate_fetcher::RateFetcher};

/// Fetch current rates from the upstream sources.
///
/// # Endpoint
///
/// `GET /api/rates`
///
/// # Response (200 OK)
///
/// Always a JSON array. When every upstream source fails this is the list of
/// 16 default quotes.
///
/// ```json
/// [
///   { "currency": "USD", "buy": "4460.00", "sell": "4560.00" },
///   { "currency": "EUR", "buy": "4640.00", "sell": "4765.00" }
/// ]
/// ```
pub async fn get_live_rates(State(fetcher): State<RateFetcher>) -> Json<Vec<ExchangeRate>> {
    Json(fetcher.fetch_rates().await)
}
