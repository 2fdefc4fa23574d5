//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `CBM_API_URL` / `HELLOLINKER_URL` (optional): upstream rate sources
/// - `FETCH_TIMEOUT_SECS` (optional): per-source timeout, defaults to 5
/// - `FETCH_USER_AGENT` (optional): User-Agent sent to upstream sources
/// - `STATIC_DIR` (optional): directory holding the built single-page app
/// - `FACEBOOK_URL`, `TELEGRAM_URL`, `YOUTUBE_URL`, `TIKTOK_URL` (optional): contact links
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_cbm_api_url")]
    pub cbm_api_url: String,

    #[serde(default = "default_hellolinker_url")]
    pub hellolinker_url: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub fetch_user_agent: String,

    #[serde(default)]
    pub static_dir: Option<String>,

    #[serde(default = "default_facebook_url")]
    pub facebook_url: String,

    #[serde(default = "default_telegram_url")]
    pub telegram_url: String,

    #[serde(default = "default_youtube_url")]
    pub youtube_url: String,

    #[serde(default = "default_tiktok_url")]
    pub tiktok_url: String,
}

/// Contact links shown on the home page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SocialLinks {
    pub facebook: String,
    pub telegram: String,
    pub youtube: String,
    pub tiktok: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_cbm_api_url() -> String {
    "https://forex.cbm.gov.mm/api/latest".to_string()
}

fn default_hellolinker_url() -> String {
    "https://www.hellolinker.com/".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_facebook_url() -> String {
    "https://www.facebook.com/share/1AmZzeQXco/".to_string()
}

fn default_telegram_url() -> String {
    "https://t.me/mmktoday".to_string()
}

fn default_youtube_url() -> String {
    "https://youtube.com/@mmktoday".to_string()
}

fn default_tiktok_url() -> String {
    "https://www.tiktok.com/@mmktoday".to_string()
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    /// - A rate source URL is not an absolute http(s) URL
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the upstream source URLs are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("CBM_API_URL", &self.cbm_api_url),
            ("HELLOLINKER_URL", &self.hellolinker_url),
        ] {
            let valid = url::Url::parse(value)
                .map(|u| matches!(u.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(ConfigError::InvalidUrl {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Contact links served by `GET /api/v1/social`.
    pub fn social_links(&self) -> SocialLinks {
        SocialLinks {
            facebook: self.facebook_url.clone(),
            telegram: self.telegram_url.clone(),
            youtube: self.youtube_url.clone(),
            tiktok: self.tiktok_url.clone(),
        }
    }

    /// Timeout applied to each upstream rate request.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
