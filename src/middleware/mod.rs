//! HTTP middleware components.
//!
//! Middleware run before route handlers and may short-circuit a request
//! (for example, rejecting callers without admin rights).

/// Admin token authentication middleware
pub mod auth;
