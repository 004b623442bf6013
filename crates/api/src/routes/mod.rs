//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database probe)
//!
//! POST /api/payments            - Relay a tokenized card charge to EfiPay
//! POST /api/orders/confirmation - Send the order-confirmation email
//! POST /api/contact             - Persist a contact/VIP submission
//! ```

pub mod contact;
pub mod orders;
pub mod payments;

use axum::{Router, routing::post};

use crate::middleware::{intake_rate_limiter, rate_limit_envelope};
use crate::state::AppState;

/// Create all API routes.
///
/// The contact endpoint carries its own per-IP rate limiter; payments and
/// confirmations are protected upstream by the card tokenizer and the
/// origin allow-list.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments", post(payments::create_charge))
        .route("/api/orders/confirmation", post(orders::send_confirmation))
        .route(
            "/api/contact",
            // The envelope middleware wraps the governor layer so breaches
            // come back as the JSON error envelope, not plain text.
            post(contact::submit)
                .layer(intake_rate_limiter())
                .layer(axum::middleware::from_fn(rate_limit_envelope)),
        )
}
