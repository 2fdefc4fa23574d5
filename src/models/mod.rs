//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// API key authentication model
pub mod api_key;
/// Currency quotes against MMK
pub mod exchange_rate;
/// World and Myanmar gold prices
pub mod gold_price;
/// Home page announcements
pub mod post;
