//! Live exchange rate fetching with sequential fallback.
//!
//! Sources are tried one after another; the first that answers with usable
//! data wins. When every source fails the canned defaults are returned, so
//! callers always get a well-formed list.
//!
//! # Sources
//!
//! - **CBM API**: JSON `{"rates": {"USD": "4460", ...}}` from the Central Bank
//!   of Myanmar. Only USD, EUR, SGD and THB are taken from it; their sell rate
//!   is the reference rate plus a fixed spread.
//! - **HelloLinker**: an HTML page scraped with CSS selectors.

use std::{collections::HashMap, sync::Arc, sync::LazyLock, time::Duration};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::config::Config;
use crate::models::exchange_rate::{DEFAULT_RATES, ExchangeRate, default_rates};

/// Spread added to the CBM reference rate to derive the sell rate.
const CBM_SPREADS: [(&str, f64); 4] = [("USD", 100.0), ("EUR", 125.0), ("SGD", 100.0), ("THB", 1.56)];

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".exchange-rate-container").expect("valid selector"));
static CURRENCY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".currency").expect("valid selector"));
static BUY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".buy").expect("valid selector"));
static SELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".sell").expect("valid selector"));

/// An upstream rate source and the URL it is fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    CbmApi(String),
    HelloLinker(String),
}

impl RateSource {
    pub fn url(&self) -> &str {
        match self {
            RateSource::CbmApi(url) | RateSource::HelloLinker(url) => url,
        }
    }
}

/// Why a single source could not be used.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no exchange rates found in page")]
    NoRates,
}

/// Fetches rates from the configured sources in order.
///
/// Cheap to clone; the HTTP client and source list are shared.
#[derive(Debug, Clone)]
pub struct RateFetcher {
    client: reqwest::Client,
    sources: Arc<[RateSource]>,
}

impl RateFetcher {
    /// Build a fetcher with a shared client using a fixed timeout and User-Agent.
    pub fn new(
        sources: Vec<RateSource>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!("Ignoring invalid User-Agent: {}", user_agent);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            sources: sources.into(),
        })
    }

    /// CBM API first, HelloLinker second.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            vec![
                RateSource::CbmApi(config.cbm_api_url.clone()),
                RateSource::HelloLinker(config.hellolinker_url.clone()),
            ],
            config.fetch_timeout(),
            &config.fetch_user_agent,
        )
    }

    /// Fetch current rates. Never fails: falls back to the defaults.
    pub async fn fetch_rates(&self) -> Vec<ExchangeRate> {
        for source in self.sources.iter() {
            match self.fetch_from(source).await {
                Ok(rates) => {
                    tracing::info!("Fetched {} rates from {}", rates.len(), source.url());
                    return rates;
                }
                Err(e) => {
                    tracing::error!("Error fetching from {}: {}", source.url(), e);
                }
            }
        }

        tracing::warn!("All sources failed, using fallback data");
        default_rates()
    }

    async fn fetch_from(&self, source: &RateSource) -> Result<Vec<ExchangeRate>, FetchError> {
        let response = self
            .client
            .get(source.url())
            .send()
            .await?
            .error_for_status()?;

        match source {
            RateSource::CbmApi(_) => {
                let body: CbmResponse = response.json().await?;
                Ok(rates_from_cbm(&body))
            }
            RateSource::HelloLinker(_) => {
                let html = response.text().await?;
                let rates = parse_hellolinker(&html);
                if rates.is_empty() {
                    return Err(FetchError::NoRates);
                }
                Ok(rates)
            }
        }
    }
}

/// Body of the CBM `latest` endpoint. Only `rates` is used.
#[derive(Debug, Default, Deserialize)]
pub struct CbmResponse {
    /// Absent and `null` both mean "no rates".
    #[serde(default)]
    pub rates: Option<HashMap<String, serde_json::Value>>,
}

impl CbmResponse {
    /// Reference rate for a code, if present and non-empty.
    fn rate(&self, code: &str) -> Option<String> {
        match self.rates.as_ref()?.get(code)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Build the full 16-currency list from a CBM response.
///
/// Currencies CBM does not cover, that are missing from the response, or
/// whose value has no leading number keep their default quotes.
pub fn rates_from_cbm(body: &CbmResponse) -> Vec<ExchangeRate> {
    DEFAULT_RATES
        .iter()
        .map(|&(code, default_buy, default_sell)| {
            let spread = CBM_SPREADS
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, spread)| *spread);

            let reference = spread.and_then(|spread| {
                let raw = body.rate(code)?;
                let value = parse_amount(&raw)?;
                Some((raw, format!("{:.2}", value + spread)))
            });

            match reference {
                Some((buy, sell)) => ExchangeRate::new(code, buy, sell),
                None => ExchangeRate::new(code, default_buy, default_sell),
            }
        })
        .collect()
}

/// Parse the leading number of an upstream amount, ignoring thousands
/// separators and any trailing text (`"4,460.00 MMK"` is 4460).
fn parse_amount(value: &str) -> Option<f64> {
    let cleaned = value.replace(',', "");
    let cleaned = cleaned.trim_start();

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, ch) in cleaned.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    cleaned[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Scrape rate rows from the HelloLinker page.
///
/// Each `.exchange-rate-container` must contain non-empty `.currency`, `.buy`
/// and `.sell` text; incomplete rows are skipped.
pub fn parse_hellolinker(html: &str) -> Vec<ExchangeRate> {
    let document = Html::parse_document(html);

    document
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let currency = field_text(row, &CURRENCY_SELECTOR).to_uppercase();
            let buy = field_text(row, &BUY_SELECTOR);
            let sell = field_text(row, &SELL_SELECTOR);

            if currency.is_empty() || buy.is_empty() || sell.is_empty() {
                tracing::debug!("Skipping incomplete rate row");
                return None;
            }
            Some(ExchangeRate::new(currency, buy, sell))
        })
        .collect()
}

fn field_text(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}
