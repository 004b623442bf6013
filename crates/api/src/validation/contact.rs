//! Contact and VIP intake validation.

use serde::{Deserialize, Serialize};
use sky_brasil_core::Email;

use super::{ErrorList, FieldError, checked_optional_text, checked_text};

/// Which form the submission came from. Selects the schema variant, the
/// acknowledgement template and the stored source tag.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Contact,
    Vip,
}

impl Source {
    /// The tag stored in the `contact_submissions.source` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Vip => "vip",
        }
    }
}

/// Raw contact/VIP request body.
#[derive(Debug, Deserialize)]
pub struct RawContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "userType", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub message: String,
    pub source: Source,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub followers: Option<String>,
}

/// A validated, sanitized contact/VIP submission.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: Email,
    pub user_type: Option<String>,
    pub message: String,
    pub source: Source,
    pub channel: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<String>,
}

/// Validate a raw contact/VIP request, collecting every failing field.
///
/// # Errors
///
/// Returns one [`FieldError`] per failing field. For `source: vip`,
/// `channel` and `platform` are required.
pub fn validate(raw: RawContactRequest) -> Result<ContactRequest, Vec<FieldError>> {
    let mut errors = ErrorList::default();

    let name = checked_text("name", &raw.name, 2, 100, &mut errors);
    let email = match Email::parse(raw.email.trim()) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push("email", e.to_string());
            None
        }
    };
    let message = checked_text("message", &raw.message, 10, 2000, &mut errors);

    let user_type = checked_optional_text("userType", raw.user_type.as_deref(), 50, &mut errors);
    let channel = checked_optional_text("channel", raw.channel.as_deref(), 100, &mut errors);
    let platform = checked_optional_text("platform", raw.platform.as_deref(), 50, &mut errors);
    let followers = checked_optional_text("followers", raw.followers.as_deref(), 20, &mut errors);

    if raw.source == Source::Vip {
        if channel.is_none() {
            errors.push("channel", "é obrigatório para cadastro VIP");
        }
        if platform.is_none() {
            errors.push("platform", "é obrigatório para cadastro VIP");
        }
    }

    if let (Some(name), Some(email), Some(message)) = (name, email, message) {
        errors.into_result(ContactRequest {
            name,
            email,
            user_type,
            message,
            source: raw.source,
            channel,
            platform,
            followers,
        })
    } else {
        Err(errors.into_errors())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_raw(source: Source) -> RawContactRequest {
        RawContactRequest {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            user_type: Some("streamer".to_string()),
            message: "Quero saber mais sobre os planos de agenciamento.".to_string(),
            source,
            channel: Some("anasouza".to_string()),
            platform: Some("Twitch".to_string()),
            followers: Some("12000".to_string()),
        }
    }

    #[test]
    fn test_valid_contact() {
        let request = validate(valid_raw(Source::Contact)).unwrap();
        assert_eq!(request.source, Source::Contact);
        assert_eq!(request.email.as_str(), "ana@example.com");
    }

    #[test]
    fn test_vip_requires_channel_and_platform() {
        let mut raw = valid_raw(Source::Vip);
        raw.channel = None;
        raw.platform = Some("   ".to_string());
        let errors = validate(raw).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"channel"));
        assert!(fields.contains(&"platform"));
    }

    #[test]
    fn test_contact_does_not_require_channel() {
        let mut raw = valid_raw(Source::Contact);
        raw.channel = None;
        raw.platform = None;
        raw.followers = None;
        assert!(validate(raw).is_ok());
    }

    #[test]
    fn test_short_message_rejected() {
        let mut raw = valid_raw(Source::Contact);
        raw.message = "oi".to_string();
        let errors = validate(raw).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "message"));
    }

    #[test]
    fn test_message_sanitized() {
        let mut raw = valid_raw(Source::Contact);
        raw.message = "Olá <script>alert(1)</script> quero participar do programa".to_string();
        let request = validate(raw).unwrap();
        assert!(!request.message.contains("<script>"));
        assert!(request.message.contains("quero participar"));
    }

    #[test]
    fn test_source_deserializes_lowercase() {
        let source: Source = serde_json::from_str("\"vip\"").unwrap();
        assert_eq!(source, Source::Vip);
        assert!(serde_json::from_str::<Source>("\"other\"").is_err());
    }
}
