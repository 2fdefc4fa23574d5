//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and upstream fetches.

pub mod post_service;
pub mod price_service;
pub mod rate_fetcher;
