//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, ApiError>`. Every failure response is a JSON envelope with
//! `success: false` and an `error` string; validation failures additionally
//! carry field-level messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::efipay::EfiPayError;
use crate::validation::FieldError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed schema validation. Field messages are returned
    /// verbatim to the caller.
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Payment processor credential exchange failed.
    #[error("Payment authentication error: {0}")]
    Authentication(String),

    /// Payment processor declined or rejected the charge.
    #[error("Charge rejected: {0}")]
    Charge(String),

    /// An upstream service could not be reached or returned garbage.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Origin not in the allow-list.
    #[error("Origin not allowed")]
    Forbidden,

    /// Caller exceeded the request budget.
    #[error("Rate limited")]
    RateLimited,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EfiPayError> for ApiError {
    fn from(err: EfiPayError) -> Self {
        match err {
            EfiPayError::Authentication { .. } => Self::Authentication(err.to_string()),
            EfiPayError::ChargeRejected { description, .. } => Self::Charge(description),
            EfiPayError::Http(_) | EfiPayError::Parse(_) => Self::Gateway(err.to_string()),
        }
    }
}

/// JSON error envelope returned to the client.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Gateway(_) | Self::Authentication(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Charge(_) => StatusCode::PAYMENT_REQUIRED,
            Self::Authentication(_) | Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let (error, errors) = match self {
            Self::Validation(fields) => ("Dados inválidos".to_string(), Some(fields)),
            Self::Charge(description) => (description, None),
            Self::Authentication(_) => ("Falha na autenticação com o processador".to_string(), None),
            Self::Gateway(_) => ("Serviço externo indisponível".to_string(), None),
            Self::Forbidden => ("Origem não permitida".to_string(), None),
            Self::RateLimited => (
                "Muitas requisições. Tente novamente em instantes.".to_string(),
                None,
            ),
            Self::Database(_) | Self::Internal(_) => ("Erro interno do servidor".to_string(), None),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error,
                errors,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(
            get_status(ApiError::Validation(vec![])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Authentication("denied".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(ApiError::Charge("declined".to_string())),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(get_status(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(ApiError::RateLimited),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            get_status(ApiError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_charge_error_passes_processor_description() {
        let err = ApiError::from(EfiPayError::ChargeRejected {
            status: 400,
            description: "cartão recusado".to_string(),
        });
        assert!(matches!(&err, ApiError::Charge(d) if d == "cartão recusado"));
    }

    #[test]
    fn test_authentication_maps_to_bad_gateway() {
        let err = ApiError::from(EfiPayError::Authentication {
            status: 401,
            message: "bad credentials".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }
}
