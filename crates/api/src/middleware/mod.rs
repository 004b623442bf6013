//! HTTP middleware: origin allow-list and per-IP rate limiting.

pub mod cors;
pub mod rate_limit;

pub use cors::{cors_layer, enforce_origin};
pub use rate_limit::{intake_rate_limiter, rate_limit_envelope};
