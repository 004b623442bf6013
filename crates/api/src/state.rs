//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::emails::Mailer;
use crate::services::{EfiPayClient, ResendClient, ResendError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the database pool
/// and the external API clients, all constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    efipay: EfiPayClient,
    mailer: Mailer,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Resend HTTP client fails to build.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, ResendError> {
        let efipay = EfiPayClient::new(&config.efipay);
        let resend = ResendClient::new(&config.resend)?;
        let mailer = Mailer::new(resend, config.resend.admin_email.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                efipay,
                mailer,
            }),
        })
    }

    /// Build a state with explicit clients. Test entry point.
    #[must_use]
    pub fn with_clients(
        config: ApiConfig,
        pool: PgPool,
        efipay: EfiPayClient,
        mailer: Mailer,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                efipay,
                mailer,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the EfiPay client.
    #[must_use]
    pub fn efipay(&self) -> &EfiPayClient {
        &self.inner.efipay
    }

    /// Get a reference to the mailer.
    #[must_use]
    pub fn mailer(&self) -> &Mailer {
        &self.inner.mailer
    }
}
