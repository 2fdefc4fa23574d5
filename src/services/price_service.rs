//! Price service - stored exchange rates and gold prices.
//!
//! # Atomicity Guarantees
//!
//! An admin price update writes both tables inside one PostgreSQL
//! transaction: either every row is upserted or none is.

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        exchange_rate::{DEFAULT_RATES, DisplayRate, RateUpdate, StoredExchangeRate},
        gold_price::{DEFAULT_GOLD_PRICES, GoldPrice, GoldPriceUpdate, StoredGoldPrice},
    },
};
use chrono::Utc;

/// Stored rates ordered by currency code, with display metadata attached.
pub async fn list_exchange_rates(pool: &DbPool) -> Result<Vec<DisplayRate>, AppError> {
    let rows = sqlx::query_as::<_, StoredExchangeRate>(
        "SELECT currency, buy_rate, sell_rate, updated_at FROM exchange_rates ORDER BY currency",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DisplayRate::from).collect())
}

/// Stored gold prices: world before myanmar, then by descending price.
pub async fn list_gold_prices(pool: &DbPool) -> Result<Vec<GoldPrice>, AppError> {
    let rows = sqlx::query_as::<_, StoredGoldPrice>(
        r#"
        SELECT type, price, change, category, updated_at
        FROM gold_prices
        ORDER BY CASE category WHEN 'world' THEN 0 ELSE 1 END, price DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(GoldPrice::from_row).collect())
}

/// Request body for `PUT /api/v1/admin/prices`.
#[derive(Debug, serde::Deserialize)]
pub struct PriceUpdateRequest {
    #[serde(default)]
    pub rates: Vec<RateUpdate>,
    #[serde(default)]
    pub gold_prices: Vec<GoldPriceUpdate>,
}

/// Response body for `PUT /api/v1/admin/prices`: the refreshed lists.
#[derive(Debug, serde::Serialize)]
pub struct PriceSnapshot {
    pub rates: Vec<DisplayRate>,
    pub gold_prices: Vec<GoldPrice>,
}

impl PriceUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rates.is_empty() && self.gold_prices.is_empty() {
            return Err(AppError::InvalidRequest("No prices to update".to_string()));
        }
        for rate in &self.rates {
            if rate.currency.trim().is_empty() {
                return Err(AppError::InvalidRequest("Currency must not be empty".to_string()));
            }
        }
        for price in &self.gold_prices {
            if price.kind.trim().is_empty() {
                return Err(AppError::InvalidRequest("Gold type must not be empty".to_string()));
            }
            if !price.price.is_finite() || !price.change.is_finite() {
                return Err(AppError::InvalidRequest(format!(
                    "Invalid price for {}",
                    price.kind
                )));
            }
        }
        Ok(())
    }
}

/// Upsert rates (keyed by currency) and gold prices (keyed by type), then
/// return the refreshed lists.
pub async fn update_prices(
    pool: &DbPool,
    request: PriceUpdateRequest,
) -> Result<PriceSnapshot, AppError> {
    request.validate()?;

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    for rate in &request.rates {
        sqlx::query(
            r#"
            INSERT INTO exchange_rates (currency, buy_rate, sell_rate, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (currency) DO UPDATE
            SET buy_rate = EXCLUDED.buy_rate,
                sell_rate = EXCLUDED.sell_rate,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(rate.currency.trim().to_uppercase())
        .bind(rate.buy.trim())
        .bind(rate.sell.trim())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for price in &request.gold_prices {
        sqlx::query(
            r#"
            INSERT INTO gold_prices (type, price, change, category, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (type) DO UPDATE
            SET price = EXCLUDED.price,
                change = EXCLUDED.change,
                category = EXCLUDED.category,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(price.kind.trim())
        .bind(price.price)
        .bind(price.change)
        .bind(price.category.as_str())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        "Updated {} rates and {} gold prices",
        request.rates.len(),
        request.gold_prices.len()
    );

    Ok(PriceSnapshot {
        rates: list_exchange_rates(pool).await?,
        gold_prices: list_gold_prices(pool).await?,
    })
}

/// Insert the canned quotes for any currency or gold type not yet stored.
pub async fn seed_defaults(pool: &DbPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    for (currency, buy, sell) in DEFAULT_RATES {
        sqlx::query(
            r#"
            INSERT INTO exchange_rates (currency, buy_rate, sell_rate)
            VALUES ($1, $2, $3)
            ON CONFLICT (currency) DO NOTHING
            "#,
        )
        .bind(currency)
        .bind(buy)
        .bind(sell)
        .execute(&mut *tx)
        .await?;
    }

    for (kind, price, change, category) in DEFAULT_GOLD_PRICES {
        sqlx::query(
            r#"
            INSERT INTO gold_prices (type, price, change, category)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (type) DO NOTHING
            "#,
        )
        .bind(kind)
        .bind(price)
        .bind(change)
        .bind(category.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gold_price::GoldCategory;

    #[test]
    fn empty_update_is_rejected() {
        let request: PriceUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(request.validate(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn rates_only_update_is_valid() {
        let request: PriceUpdateRequest = serde_json::from_str(
            r#"{"rates":[{"currency":"usd","buy":"4470.00","sell":"4570.00"}]}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.gold_prices.is_empty());
    }

    #[test]
    fn blank_gold_type_is_rejected() {
        let request: PriceUpdateRequest = serde_json::from_str(
            r#"{"gold_prices":[{"type":" ","price":1.0,"change":0.0,"category":"world"}]}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn seeding_twice_keeps_one_row_per_key(pool: sqlx::PgPool) {
        seed_defaults(&pool).await.unwrap();
        seed_defaults(&pool).await.unwrap();

        assert_eq!(list_exchange_rates(&pool).await.unwrap().len(), 16);
        assert_eq!(list_gold_prices(&pool).await.unwrap().len(), 12);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn update_upserts_and_survives_reseeding(pool: sqlx::PgPool) {
        seed_defaults(&pool).await.unwrap();

        let request: PriceUpdateRequest = serde_json::from_str(
            r#"{"rates":[{"currency":" usd ","buy":"4470.00","sell":"4570.00"},
                         {"currency":"XAU","buy":"1","sell":"2"}],
                "gold_prices":[{"type":"16 Pae Yae","price":6500000.0,"change":76093.92,"category":"myanmar"}]}"#,
        )
        .unwrap();
        let snapshot = update_prices(&pool, request).await.unwrap();

        assert_eq!(snapshot.rates.len(), 17);
        let usd = snapshot.rates.iter().find(|r| r.code == "USD").unwrap();
        assert_eq!((usd.buy.as_str(), usd.sell.as_str()), ("4470.00", "4570.00"));

        // Defaults never overwrite edited rows
        seed_defaults(&pool).await.unwrap();
        let gold = list_gold_prices(&pool).await.unwrap();
        assert_eq!(gold.len(), 12);
        assert_eq!(gold[0].category, GoldCategory::World);
        let pae_yae = gold.iter().find(|g| g.kind == "16 Pae Yae").unwrap();
        assert_eq!(pae_yae.price, 6500000.0);
    }

    #[test]
    fn unknown_gold_category_fails_to_parse() {
        let parsed = serde_json::from_str::<PriceUpdateRequest>(
            r#"{"gold_prices":[{"type":"24 Karat","price":1.0,"change":0.0,"category":"moon"}]}"#,
        );
        assert!(parsed.is_err());
    }
}
