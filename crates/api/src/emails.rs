//! Transactional emails: Askama templates plus a mailer facade.
//!
//! All templates autoescape, so sanitized free text can be interpolated
//! directly. Sends go through the Resend client; callers decide whether a
//! failure is fatal (it never is — email is best-effort everywhere).

use askama::Template;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::filters;
use crate::models::ContactSubmission;
use crate::services::{ResendClient, ResendError};
use crate::validation::{ConfirmationItem, ConfirmationRequest, Source};

/// How much of the submitted message the acknowledgement email echoes back.
const ACK_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when rendering or sending an email.
#[derive(Debug, Error)]
pub enum MailError {
    /// Delivery through Resend failed.
    #[error("Resend error: {0}")]
    Resend(#[from] ResendError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Order confirmation sent to the customer after a successful charge.
#[derive(Template)]
#[template(path = "emails/order_confirmation.html")]
struct OrderConfirmationEmail<'a> {
    name: &'a str,
    order_id: &'a str,
    items: &'a [ConfirmationItem],
    total: Decimal,
}

/// Acknowledgement for a plain contact-form submission.
#[derive(Template)]
#[template(path = "emails/contact_ack.html")]
struct ContactAckEmail<'a> {
    name: &'a str,
    excerpt: &'a str,
}

/// Acknowledgement for a VIP signup.
#[derive(Template)]
#[template(path = "emails/vip_ack.html")]
struct VipAckEmail<'a> {
    name: &'a str,
    channel: &'a str,
    platform: &'a str,
    followers: Option<&'a str>,
}

/// Internal notification enumerating every submitted field.
#[derive(Template)]
#[template(path = "emails/admin_notification.html")]
struct AdminNotificationEmail<'a> {
    submission: &'a ContactSubmission,
    created_at: String,
}

/// Mailer facade over the Resend client.
#[derive(Clone)]
pub struct Mailer {
    resend: ResendClient,
    admin_email: String,
}

impl Mailer {
    #[must_use]
    pub const fn new(resend: ResendClient, admin_email: String) -> Self {
        Self {
            resend,
            admin_email,
        }
    }

    /// Send the order-confirmation email. Returns the provider's email id.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or delivery fails.
    pub async fn send_order_confirmation(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<String, MailError> {
        let html = OrderConfirmationEmail {
            name: &request.name,
            order_id: &request.order_id,
            items: &request.items,
            total: request.total,
        }
        .render()?;

        let subject = format!("Confirmação do pedido {}", request.order_id);
        let id = self
            .resend
            .send(request.email.as_str(), &subject, &html)
            .await?;
        Ok(id)
    }

    /// Send the acknowledgement email for a contact/VIP submission,
    /// choosing the template by source.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or delivery fails.
    pub async fn send_submission_ack(
        &self,
        submission: &ContactSubmission,
    ) -> Result<String, MailError> {
        let (subject, html) = match submission.source {
            Source::Contact => {
                let excerpt: String = submission.message.chars().take(ACK_EXCERPT_CHARS).collect();
                (
                    "Recebemos sua mensagem".to_string(),
                    ContactAckEmail {
                        name: &submission.name,
                        excerpt: &excerpt,
                    }
                    .render()?,
                )
            }
            Source::Vip => (
                "Bem-vindo à lista VIP SKY BRASIL".to_string(),
                VipAckEmail {
                    name: &submission.name,
                    channel: submission.channel.as_deref().unwrap_or("-"),
                    platform: submission.platform.as_deref().unwrap_or("-"),
                    followers: submission.followers.as_deref(),
                }
                .render()?,
            ),
        };

        let id = self
            .resend
            .send(submission.email.as_str(), &subject, &html)
            .await?;
        Ok(id)
    }

    /// Send the admin notification for a persisted submission.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or delivery fails.
    pub async fn send_admin_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<String, MailError> {
        let html = AdminNotificationEmail {
            submission,
            created_at: submission
                .created_at
                .format("%d/%m/%Y %H:%M UTC")
                .to_string(),
        }
        .render()?;

        let subject = format!(
            "Nova submissão ({}): {}",
            submission.source.as_str(),
            submission.name
        );
        let id = self.resend.send(&self.admin_email, &subject, &html).await?;
        Ok(id)
    }
}
