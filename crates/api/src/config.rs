//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SKY_DATABASE_URL` - `PostgreSQL` connection string
//! - `EFIPAY_CLIENT_ID` - Payment processor OAuth client ID
//! - `EFIPAY_CLIENT_SECRET` - Payment processor OAuth client secret
//! - `RESEND_API_KEY` - Resend transactional email API key
//! - `ADMIN_EMAIL` - Address that receives admin notifications
//!
//! ## Optional
//! - `SKY_HOST` - Bind address (default: 127.0.0.1)
//! - `SKY_PORT` - Listen port (default: 3000)
//! - `EFIPAY_ENVIRONMENT` - `sandbox` or `production` (default: sandbox)
//! - `RESEND_FROM_ADDRESS` - Sender address (default: SKY BRASIL <contato@skybrasil.com.br>)
//! - `ALLOWED_ORIGINS` - Comma-separated origin allow-list
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Default origin allow-list: production domains plus local dev servers.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://skybrasil.com.br",
    "https://www.skybrasil.com.br",
    "http://localhost:5173",
    "http://localhost:3000",
];

/// Staging deploys live under this domain suffix.
const STAGING_ORIGIN_SUFFIX: &str = ".skybrasil.pages.dev";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Payment processor configuration
    pub efipay: EfiPayConfig,
    /// Transactional email configuration
    pub resend: ResendConfig,
    /// Exact origins allowed to call the API
    pub allowed_origins: Vec<String>,
    /// Domain suffix for staging deploys, also allowed
    pub staging_origin_suffix: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Payment processor environment. Selects which fixed base URL the
/// client talks to; never inferred from request content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfiPayEnvironment {
    Sandbox,
    Production,
}

impl EfiPayEnvironment {
    /// The processor's API base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://cobrancas.api.efipay.com.br",
            Self::Sandbox => "https://cobrancas-h.api.efipay.com.br",
        }
    }
}

impl std::str::FromStr for EfiPayEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(format!("expected 'sandbox' or 'production', got '{other}'")),
        }
    }
}

/// EfiPay payment processor configuration.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct EfiPayConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
    /// Sandbox or production
    pub environment: EfiPayEnvironment,
}

impl std::fmt::Debug for EfiPayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EfiPayConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Resend transactional email configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ResendConfig {
    /// Resend API key
    pub api_key: SecretString,
    /// Sender address, e.g. `SKY BRASIL <contato@skybrasil.com.br>`
    pub from_address: String,
    /// Address that receives admin notifications
    pub admin_email: String,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SKY_DATABASE_URL")?;
        let host = get_env_or_default("SKY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SKY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SKY_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SKY_PORT".to_string(), e.to_string()))?;

        let efipay = EfiPayConfig::from_env()?;
        let resend = ResendConfig::from_env()?;

        let allowed_origins = get_optional_env("ALLOWED_ORIGINS").map_or_else(
            || {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            },
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            },
        );

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            efipay,
            resend,
            allowed_origins,
            staging_origin_suffix: STAGING_ORIGIN_SUFFIX.to_string(),
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EfiPayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = get_env_or_default("EFIPAY_ENVIRONMENT", "sandbox")
            .parse::<EfiPayEnvironment>()
            .map_err(|e| ConfigError::InvalidEnvVar("EFIPAY_ENVIRONMENT".to_string(), e))?;

        Ok(Self {
            client_id: get_required_env("EFIPAY_CLIENT_ID")?,
            client_secret: get_validated_secret("EFIPAY_CLIENT_SECRET")?,
            environment,
        })
    }
}

impl ResendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: get_validated_secret("RESEND_API_KEY")?,
            from_address: get_env_or_default(
                "RESEND_FROM_ADDRESS",
                "SKY BRASIL <contato@skybrasil.com.br>",
            ),
            admin_email: get_required_env("ADMIN_EMAIL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a real key."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
