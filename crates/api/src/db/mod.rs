//! Database operations.
//!
//! One table, insert-only:
//!
//! - `contact_submissions` - contact-form and VIP-signup submissions
//!
//! Migrations live in `crates/api/migrations/` and are embedded via
//! `sqlx::migrate!`, applied at startup.

pub mod submissions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use submissions::SubmissionRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value no longer parses as its domain type.
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
