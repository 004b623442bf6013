//! Resend transactional email client.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ResendConfig;

/// Resend API base URL.
const BASE_URL: &str = "https://api.resend.com";

/// Errors that can occur when sending email through Resend.
#[derive(Debug, Error)]
pub enum ResendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
    from_address: String,
}

impl ResendClient {
    /// Create a new Resend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ResendConfig) -> Result<Self, ResendError> {
        Self::with_base_url(config, BASE_URL)
    }

    /// Create a client against an explicit base URL. Test entry point.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_base_url(config: &ResendConfig, base_url: &str) -> Result<Self, ResendError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ResendError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            from_address: config.from_address.clone(),
        })
    }

    /// Send an HTML email. Returns the provider's email id.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or is rejected.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, ResendError> {
        let url = format!("{}/emails", self.base_url);

        let body = serde_json::json!({
            "from": self.from_address,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ResendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| ResendError::Parse(e.to_string()))?;

        Ok(sent.id)
    }
}

/// Response from a successful send.
#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}
