//! Submission repository.

use chrono::{DateTime, Utc};
use sky_brasil_core::Email;
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryError;
use crate::models::ContactSubmission;
use crate::validation::{ContactRequest, Source};

/// Repository for contact/VIP submission rows.
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

/// Raw row shape, converted into [`ContactSubmission`] after parsing.
#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: Uuid,
    name: String,
    email: String,
    user_type: Option<String>,
    message: String,
    source: String,
    channel: Option<String>,
    platform: Option<String>,
    followers: Option<String>,
    created_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn into_submission(self) -> Result<ContactSubmission, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let source = match self.source.as_str() {
            "contact" => Source::Contact,
            "vip" => Source::Vip,
            other => {
                return Err(RepositoryError::DataCorruption(format!(
                    "unknown submission source in database: {other}"
                )));
            }
        };

        Ok(ContactSubmission {
            id: self.id,
            name: self.name,
            email,
            user_type: self.user_type,
            message: self.message,
            source,
            channel: self.channel,
            platform: self.platform,
            followers: self.followers,
            created_at: self.created_at,
        })
    }
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one validated submission. Rows are never updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactSubmission, RepositoryError> {
        let row: SubmissionRow = sqlx::query_as(
            r"
            INSERT INTO contact_submissions
                (name, email, user_type, message, source, channel, platform, followers)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, user_type, message, source,
                      channel, platform, followers, created_at
            ",
        )
        .bind(&request.name)
        .bind(request.email.as_str())
        .bind(&request.user_type)
        .bind(&request.message)
        .bind(request.source.as_str())
        .bind(&request.channel)
        .bind(&request.platform)
        .bind(&request.followers)
        .fetch_one(self.pool)
        .await?;

        row.into_submission()
    }
}
