//! Contact/VIP intake route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::db::SubmissionRepository;
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validation::{self, Source, contact::RawContactRequest};

/// Response for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// Accept a contact-form or VIP-signup submission.
///
/// POST /api/contact
///
/// Origin and rate-limit checks run in middleware before this handler.
/// The row insert is the one operation that can fail the request; the
/// acknowledgement and admin emails are best-effort.
#[instrument(skip(state, raw))]
pub async fn submit(
    State(state): State<AppState>,
    Json(raw): Json<RawContactRequest>,
) -> Result<Json<SubmitResponse>> {
    let request = validation::contact::validate(raw).map_err(ApiError::Validation)?;

    let submission = SubmissionRepository::new(state.pool())
        .insert(&request)
        .await?;

    tracing::info!(
        id = %submission.id,
        source = submission.source.as_str(),
        "Submission persisted"
    );

    if let Err(e) = state.mailer().send_submission_ack(&submission).await {
        tracing::warn!(id = %submission.id, error = %e, "Acknowledgement email failed");
    }
    if let Err(e) = state.mailer().send_admin_notification(&submission).await {
        tracing::warn!(id = %submission.id, error = %e, "Admin notification failed");
    }

    let message = match submission.source {
        Source::Contact => "Mensagem recebida! Responderemos em breve.".to_string(),
        Source::Vip => "Cadastro VIP recebido! Vamos analisar seu perfil.".to_string(),
    };

    Ok(Json(SubmitResponse {
        success: true,
        message,
        id: submission.id,
    }))
}
