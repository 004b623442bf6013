//! Contact/VIP submission model.

use chrono::{DateTime, Utc};
use sky_brasil_core::Email;
use uuid::Uuid;

use crate::validation::Source;

/// A persisted contact-form or VIP-signup submission.
///
/// Rows are immutable after creation: insert-only, never updated or
/// deleted by this code.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub user_type: Option<String>,
    pub message: String,
    pub source: Source,
    pub channel: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<String>,
    pub created_at: DateTime<Utc>,
}
