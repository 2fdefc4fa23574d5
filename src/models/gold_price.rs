//! Gold price models.
//!
//! Prices come in two categories: world prices quoted per troy ounce and
//! Myanmar prices in Kyat per Kyat Tha, graded by purity (Pae Yae).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market a gold quote belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoldCategory {
    World,
    Myanmar,
}

impl GoldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoldCategory::World => "world",
            GoldCategory::Myanmar => "myanmar",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "world" => Some(GoldCategory::World),
            "myanmar" => Some(GoldCategory::Myanmar),
            _ => None,
        }
    }

    /// Quantity a price refers to.
    pub fn unit(&self) -> &'static str {
        match self {
            GoldCategory::World => "1 oz",
            GoldCategory::Myanmar => "1 Kyat Tha",
        }
    }
}

/// Represents a row of the `gold_prices` table.
///
/// `type` is unique; writes upsert on it. `category` is constrained to
/// `world` or `myanmar` by the schema.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredGoldPrice {
    #[sqlx(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub change: f64,
    pub category: String,
    pub updated_at: DateTime<Utc>,
}

/// Response body for `GET /api/v1/gold-prices`.
///
/// # JSON Example
///
/// ```json
/// {
///   "type": "16 Pae Yae",
///   "price": 6423906.08,
///   "change": -2500.0,
///   "category": "myanmar",
///   "unit": "1 Kyat Tha",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct GoldPrice {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub change: f64,
    pub category: GoldCategory,
    pub unit: &'static str,
    pub updated_at: DateTime<Utc>,
}

impl GoldPrice {
    /// Convert a stored row; rows with an unknown category are dropped.
    pub fn from_row(row: StoredGoldPrice) -> Option<Self> {
        let category = GoldCategory::parse(&row.category)?;
        Some(Self {
            kind: row.kind,
            price: row.price,
            change: row.change,
            category,
            unit: category.unit(),
            updated_at: row.updated_at,
        })
    }
}

/// Request item for the admin price update.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldPriceUpdate {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub change: f64,
    pub category: GoldCategory,
}

/// Canned quotes as `(type, price, change, category)`.
pub const DEFAULT_GOLD_PRICES: [(&str, f64, f64, GoldCategory); 12] = [
    ("24 Karat", 2742.96, -2.14, GoldCategory::World),
    ("22 Karat", 2534.57, -1.14, GoldCategory::World),
    ("21 Karat", 2400.27, -0.14, GoldCategory::World),
    ("18 Karat", 2087.37, -1.24, GoldCategory::World),
    ("16 Pae Yae", 6423906.08, -2500.0, GoldCategory::Myanmar),
    ("15 Pae Yae", 6155862.92, -2000.0, GoldCategory::Myanmar),
    ("14 Pae 2 Pae Yae", 5887840.89, -1800.0, GoldCategory::Myanmar),
    ("14 Pae Yae", 5620219.64, -1500.0, GoldCategory::Myanmar),
    ("13 Pae Yae", 5152588.40, -1200.0, GoldCategory::Myanmar),
    ("12 Pae 2 Pae Yae", 4817333.26, -1000.0, GoldCategory::Myanmar),
    ("11 Pae Yae", 4282070.72, -800.0, GoldCategory::Myanmar),
    ("9 Pae Yae", 3746805.52, -600.0, GoldCategory::Myanmar),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str) -> StoredGoldPrice {
        StoredGoldPrice {
            kind: "16 Pae Yae".into(),
            price: 6423906.08,
            change: -2500.0,
            category: category.into(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn myanmar_prices_are_per_kyat_tha() {
        let price = GoldPrice::from_row(row("myanmar")).unwrap();
        assert_eq!(price.category, GoldCategory::Myanmar);
        assert_eq!(price.unit, "1 Kyat Tha");

        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["type"], "16 Pae Yae");
        assert_eq!(json["category"], "myanmar");
    }

    #[test]
    fn unknown_category_is_dropped() {
        assert!(GoldPrice::from_row(row("lunar")).is_none());
    }

    #[test]
    fn update_request_reads_type_field() {
        let update: GoldPriceUpdate = serde_json::from_str(
            r#"{"type":"24 Karat","price":2750.5,"change":7.54,"category":"world"}"#,
        )
        .unwrap();
        assert_eq!(update.kind, "24 Karat");
        assert_eq!(update.category, GoldCategory::World);
    }

    #[test]
    fn defaults_split_four_world_eight_myanmar() {
        let world = DEFAULT_GOLD_PRICES
            .iter()
            .filter(|(_, _, _, c)| *c == GoldCategory::World)
            .count();
        assert_eq!(world, 4);
        assert_eq!(DEFAULT_GOLD_PRICES.len() - world, 8);
    }
}
