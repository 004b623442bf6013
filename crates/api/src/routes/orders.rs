//! Order-confirmation route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validation::{self, confirmation::RawConfirmationRequest};

/// Response for a confirmation request.
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub success: bool,
    #[serde(rename = "emailId", skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Send the order-confirmation email.
///
/// POST /api/orders/confirmation
///
/// The charge has already succeeded by the time this is called, so a send
/// failure is logged and reported as `success: false` with HTTP 200, never
/// as an HTTP failure.
#[instrument(skip(state, raw), fields(order_id))]
pub async fn send_confirmation(
    State(state): State<AppState>,
    Json(raw): Json<RawConfirmationRequest>,
) -> Result<Json<ConfirmationResponse>> {
    let request = validation::confirmation::validate(raw).map_err(ApiError::Validation)?;
    tracing::Span::current().record("order_id", request.order_id.as_str());

    match state.mailer().send_order_confirmation(&request).await {
        Ok(email_id) => {
            tracing::info!(email_id = %email_id, "Confirmation email sent");
            Ok(Json(ConfirmationResponse {
                success: true,
                email_id: Some(email_id),
                error: None,
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Confirmation email failed to send");
            Ok(Json(ConfirmationResponse {
                success: false,
                email_id: None,
                error: Some("Não foi possível enviar o email de confirmação".to_string()),
            }))
        }
    }
}
