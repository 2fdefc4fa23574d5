//! Exchange rate models.
//!
//! This module defines:
//! - `ExchangeRate`: a quoted buy/sell pair against MMK, as served by `/api/rates`
//! - `StoredExchangeRate`: a row of the `exchange_rates` table
//! - `DisplayRate`: a stored rate enriched with the currency's name, flag and link
//! - `DEFAULT_RATES`: the canned quotes used when every live source fails

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A buy/sell quote for one currency against the Myanmar Kyat.
///
/// Values are kept as strings exactly as the source formatted them.
///
/// # JSON Example
///
/// ```json
/// { "currency": "USD", "buy": "4460.00", "sell": "4560.00" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: String,
    pub buy: String,
    pub sell: String,
}

impl ExchangeRate {
    pub fn new(currency: impl Into<String>, buy: impl Into<String>, sell: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            buy: buy.into(),
            sell: sell.into(),
        }
    }
}

/// Canned quotes as `(currency, buy, sell)`, in display order.
pub const DEFAULT_RATES: [(&str, &str, &str); 16] = [
    ("USD", "4460.00", "4560.00"),
    ("EUR", "4640.00", "4765.00"),
    ("SGD", "3275.00", "3375.00"),
    ("THB", "131.58", "133.14"),
    ("MYR", "1013.00", "1040.00"),
    ("JPY", "28.49", "29.26"),
    ("CNY", "610.00", "627.00"),
    ("WON", "3.09", "3.17"),
    ("GBP", "5520.00", "5670.00"),
    ("AUD", "2790.00", "2865.00"),
    ("CAD", "3080.00", "3165.00"),
    ("NTD", "135.00", "139.00"),
    ("AED", "1207.00", "1240.00"),
    ("INR", "51.35", "52.75"),
    ("HKD", "556.00", "565.00"),
    ("MOP", "552.00", "567.00"),
];

/// The canned quotes as owned values.
pub fn default_rates() -> Vec<ExchangeRate> {
    DEFAULT_RATES
        .iter()
        .map(|(currency, buy, sell)| ExchangeRate::new(*currency, *buy, *sell))
        .collect()
}

/// Represents a row of the `exchange_rates` table.
///
/// `currency` is unique; writes upsert on it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct StoredExchangeRate {
    pub currency: String,
    pub buy_rate: String,
    pub sell_rate: String,
    pub updated_at: DateTime<Utc>,
}

/// Response body for `GET /api/v1/exchange-rates`.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": "USD",
///   "currency": "US Dollar",
///   "flag": "https://flagsapi.com/US/flat/64.png",
///   "link": "https://hellolinker.net/rates/exchange-price/usd",
///   "buy": "4460.00",
///   "sell": "4560.00",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRate {
    pub code: String,
    pub currency: String,
    pub flag: String,
    pub link: String,
    pub buy: String,
    pub sell: String,
    pub updated_at: DateTime<Utc>,
}

/// Attach display metadata. Unknown codes use the code as the name and no flag or link.
impl From<StoredExchangeRate> for DisplayRate {
    fn from(row: StoredExchangeRate) -> Self {
        let (currency, flag, link) = match currency_info(&row.currency) {
            Some(info) => (info.name.to_string(), info.flag_url(), info.link()),
            None => (row.currency.clone(), String::new(), String::new()),
        };

        Self {
            code: row.currency,
            currency,
            flag,
            link,
            buy: row.buy_rate,
            sell: row.sell_rate,
            updated_at: row.updated_at,
        }
    }
}

/// Static display metadata for a quoted currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    /// Two-letter country code on the flag CDN; `None` uses `flag_override`.
    country: Option<&'static str>,
    flag_override: Option<&'static str>,
}

const FLAG_CDN: &str = "https://flagsapi.com";
const DETAIL_BASE: &str = "https://hellolinker.net/rates/exchange-price";

impl CurrencyInfo {
    const fn with_country(code: &'static str, name: &'static str, country: &'static str) -> Self {
        Self {
            code,
            name,
            country: Some(country),
            flag_override: None,
        }
    }

    pub fn flag_url(&self) -> String {
        match (self.country, self.flag_override) {
            (_, Some(url)) => url.to_string(),
            (Some(country), None) => format!("{FLAG_CDN}/{country}/flat/64.png"),
            (None, None) => String::new(),
        }
    }

    pub fn link(&self) -> String {
        format!("{DETAIL_BASE}/{}", self.code.to_lowercase())
    }
}

static CURRENCIES: [CurrencyInfo; 16] = [
    CurrencyInfo::with_country("USD", "US Dollar", "US"),
    CurrencyInfo {
        code: "EUR",
        name: "Euro",
        country: None,
        flag_override: Some(
            "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b7/Flag_of_Europe.svg/510px-Flag_of_Europe.svg.png",
        ),
    },
    CurrencyInfo::with_country("SGD", "Singapore Dollar", "SG"),
    CurrencyInfo::with_country("THB", "Thai Baht", "TH"),
    CurrencyInfo::with_country("MYR", "Malaysian Ringgit", "MY"),
    CurrencyInfo::with_country("JPY", "Japanese Yen", "JP"),
    CurrencyInfo::with_country("CNY", "Chinese Yuan", "CN"),
    CurrencyInfo::with_country("WON", "Korean Won", "KR"),
    CurrencyInfo::with_country("GBP", "British Pound", "GB"),
    CurrencyInfo::with_country("AUD", "Australian Dollar", "AU"),
    CurrencyInfo::with_country("CAD", "Canadian Dollar", "CA"),
    CurrencyInfo::with_country("NTD", "New Taiwan Dollar", "TW"),
    CurrencyInfo::with_country("AED", "UAE Dirham", "AE"),
    CurrencyInfo::with_country("INR", "Indian Rupee", "IN"),
    CurrencyInfo::with_country("HKD", "Hong Kong Dollar", "HK"),
    CurrencyInfo::with_country("MOP", "Macanese Pataca", "MO"),
];

/// Look up display metadata by currency code (case-sensitive, upper case).
pub fn currency_info(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|info| info.code == code)
}

/// Request item for the admin price update.
#[derive(Debug, Clone, Deserialize)]
pub struct RateUpdate {
    pub currency: String,
    pub buy: String,
    pub sell: String,
}
