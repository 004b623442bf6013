//! Payment relay route handler.
//!
//! Strictly sequential, no retries: validate, exchange credentials for an
//! access token, submit the one-step charge. Validation failures return
//! before any network call; no card data other than the opaque token ever
//! passes through.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validation::{self, FieldError, payment::RawPaymentRequest};

/// Response for a successful charge.
#[derive(Debug, Serialize)]
pub struct ChargeResponse {
    pub success: bool,
    pub charge_id: i64,
    pub status: String,
    /// Total charged, in minor currency units.
    pub total: i64,
}

/// Submit a one-step charge.
///
/// POST /api/payments
#[instrument(skip_all)]
pub async fn create_charge(
    State(state): State<AppState>,
    Json(raw): Json<RawPaymentRequest>,
) -> Result<Json<ChargeResponse>> {
    let request = validation::payment::validate(raw).map_err(ApiError::Validation)?;

    let total = request.total().map_err(|_| {
        ApiError::Validation(vec![FieldError::new(
            "items",
            "o total do pedido excede o limite suportado",
        )])
    })?;

    let access_token = state.efipay().authenticate().await?;
    let result = state
        .efipay()
        .charge_one_step(&access_token, &request, total)
        .await?;

    tracing::info!(
        charge_id = result.charge_id,
        status = %result.status,
        total = total.cents(),
        "Charge accepted by processor"
    );

    // The total reported back is the locally computed sum, never the
    // processor's echo.
    Ok(Json(ChargeResponse {
        success: true,
        charge_id: result.charge_id,
        status: result.status,
        total: total.cents(),
    }))
}
