//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls into a service
//! 3. Returns HTTP response (JSON, status code)

/// Database reachability check
pub mod health;
/// Posts feed and admin post management
pub mod posts;
/// Stored rates and gold prices, admin price updates
pub mod prices;
/// Live rates with fallback
pub mod rates;
/// Contact links
pub mod social;
