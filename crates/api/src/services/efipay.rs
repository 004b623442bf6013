//! EfiPay payment processor client.
//!
//! Two calls per checkout, strictly sequential, no retries: an OAuth
//! client-credentials exchange followed by a one-step credit-card charge
//! carrying the opaque card token. The token is the only card-derived
//! artifact this service ever sees.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sky_brasil_core::Money;
use thiserror::Error;

use crate::config::EfiPayConfig;
use crate::validation::PaymentRequest;

/// Processor's customer records require a birth date; the checkout form
/// does not collect one, so a fixed placeholder is sent.
const PLACEHOLDER_BIRTH: &str = "1990-01-01";

/// Errors that can occur when interacting with the EfiPay API.
#[derive(Debug, Error)]
pub enum EfiPayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential exchange was rejected.
    #[error("Authentication failed: {status} - {message}")]
    Authentication { status: u16, message: String },

    /// The processor declined or rejected the charge.
    #[error("Charge rejected: {status} - {description}")]
    ChargeRejected { status: u16, description: String },

    /// Failed to parse a processor response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result of a successful one-step charge.
///
/// Only the charge id and status come from the processor. The total the
/// client sees is the locally computed sum; whatever amount the processor
/// echoes back is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeResult {
    pub charge_id: i64,
    pub status: String,
}

/// EfiPay API client.
///
/// Constructed once at startup from [`EfiPayConfig`]; the base URL is fixed
/// by the configured environment and never derived from request content.
#[derive(Clone)]
pub struct EfiPayClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: SecretString,
}

impl EfiPayClient {
    /// Create a client for the configured environment.
    #[must_use]
    pub fn new(config: &EfiPayConfig) -> Self {
        Self::with_base_url(config, config.environment.base_url())
    }

    /// Create a client against an explicit base URL. Test entry point.
    #[must_use]
    pub fn with_base_url(config: &EfiPayConfig, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Exchange service credentials for a short-lived access token.
    ///
    /// # Errors
    ///
    /// Returns [`EfiPayError::Authentication`] if the exchange is rejected,
    /// [`EfiPayError::Http`] on transport failure.
    pub async fn authenticate(&self) -> Result<String, EfiPayError> {
        let url = format!("{}/v1/authorize", self.base_url);
        let credentials = BASE64.encode(format!(
            "{}:{}",
            self.client_id,
            self.client_secret.expose_secret()
        ));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Basic {credentials}"))
            .json(&serde_json::json!({ "grant_type": "client_credentials" }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EfiPayError::Authentication {
                status: status.as_u16(),
                message,
            });
        }

        let body: AuthorizeResponse = response
            .json()
            .await
            .map_err(|e| EfiPayError::Parse(e.to_string()))?;

        Ok(body.access_token)
    }

    /// Submit a one-step credit-card charge.
    ///
    /// # Errors
    ///
    /// Returns [`EfiPayError::ChargeRejected`] with the processor's error
    /// description if the charge is declined, [`EfiPayError::Http`] on
    /// transport failure.
    pub async fn charge_one_step(
        &self,
        access_token: &str,
        request: &PaymentRequest,
        total: Money,
    ) -> Result<ChargeResult, EfiPayError> {
        let url = format!("{}/v1/charge/one-step", self.base_url);

        let items: Vec<serde_json::Value> = request
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "name": item.name,
                    "value": item.value.cents(),
                    "amount": item.amount,
                })
            })
            .collect();

        let custom_id = format!("ORDER_{}", chrono::Utc::now().timestamp_millis());

        let payload = serde_json::json!({
            "items": items,
            "metadata": { "custom_id": custom_id },
            "payment": {
                "credit_card": {
                    "payment_token": request.payment_token,
                    "billing_address": {
                        "street": request.billing_address.street,
                        "number": request.billing_address.number,
                        "neighborhood": request.billing_address.neighborhood,
                        "zipcode": request.billing_address.zipcode.as_str(),
                        "city": request.billing_address.city,
                        "complement": request.billing_address.complement,
                    },
                    "customer": {
                        "name": request.customer.name,
                        "email": request.customer.email.as_str(),
                        "cpf": request.customer.cpf.as_str(),
                        "phone_number": request.customer.phone.as_str(),
                        "birth": PLACEHOLDER_BIRTH,
                    },
                },
            },
        });

        tracing::debug!(custom_id = %custom_id, total = total.cents(), "Submitting one-step charge");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {access_token}"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EfiPayError::ChargeRejected {
                status: status.as_u16(),
                description: extract_error_description(&body),
            });
        }

        let body: ChargeResponse = response
            .json()
            .await
            .map_err(|e| EfiPayError::Parse(e.to_string()))?;

        Ok(body.data)
    }
}

/// Pull the processor's `error_description` out of an error body, falling
/// back to the raw text.
fn extract_error_description(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error_description")
                .and_then(|d| d.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    data: ChargeResult,
}
