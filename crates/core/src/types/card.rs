//! Card brand detection by number prefix.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Card brands accepted by the payment processor, plus a fallback.
///
/// Detection is best-effort classification for the tokenizer's benefit;
/// the processor remains the source of truth for brand acceptance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Jcb,
    Diners,
    Hipercard,
    Elo,
    /// Prefix matched no known brand. Unknown numbers are passed through
    /// to the processor unclassified rather than being guessed at.
    #[default]
    Unknown,
}

impl CardBrand {
    /// Classify a card number by its leading digits.
    ///
    /// Non-digit characters (spaces, dashes) are ignored. Hipercard is
    /// checked before Diners so that the shared `38` prefix space
    /// (`38410x`) resolves to Hipercard.
    #[must_use]
    pub fn detect(number: &str) -> Self {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();

        if digits.starts_with('4') {
            return Self::Visa;
        }
        if matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55")) {
            return Self::Mastercard;
        }
        if digits.starts_with("34") || digits.starts_with("37") {
            return Self::Amex;
        }
        if digits.starts_with("6011") || digits.starts_with("65") {
            return Self::Discover;
        }
        if digits.starts_with("2131") || digits.starts_with("1800") || digits.starts_with("35") {
            return Self::Jcb;
        }
        if ["606282", "38410", "38414", "38416", "637095", "637568"]
            .iter()
            .any(|p| digits.starts_with(p))
        {
            return Self::Hipercard;
        }
        if matches!(
            digits.get(..3),
            Some("300" | "301" | "302" | "303" | "304" | "305")
        ) || digits.starts_with("36")
            || digits.starts_with("38")
        {
            return Self::Diners;
        }
        if digits.starts_with("636368") {
            return Self::Elo;
        }

        Self::Unknown
    }

    /// The processor's lowercase identifier for the brand.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Jcb => "jcb",
            Self::Diners => "diners",
            Self::Hipercard => "hipercard",
            Self::Elo => "elo",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa() {
        assert_eq!(CardBrand::detect("4111111111111111"), CardBrand::Visa);
    }

    #[test]
    fn test_mastercard_range() {
        assert_eq!(CardBrand::detect("5111111111111118"), CardBrand::Mastercard);
        assert_eq!(CardBrand::detect("5555555555554444"), CardBrand::Mastercard);
        // 56 is outside the 51-55 range
        assert_eq!(CardBrand::detect("5611111111111111"), CardBrand::Unknown);
    }

    #[test]
    fn test_amex() {
        assert_eq!(CardBrand::detect("340000000000009"), CardBrand::Amex);
        assert_eq!(CardBrand::detect("370000000000002"), CardBrand::Amex);
    }

    #[test]
    fn test_discover() {
        assert_eq!(CardBrand::detect("6011000000000004"), CardBrand::Discover);
        assert_eq!(CardBrand::detect("6500000000000002"), CardBrand::Discover);
    }

    #[test]
    fn test_jcb() {
        assert_eq!(CardBrand::detect("3530111333300000"), CardBrand::Jcb);
        assert_eq!(CardBrand::detect("2131000000000008"), CardBrand::Jcb);
        assert_eq!(CardBrand::detect("1800000000000000"), CardBrand::Jcb);
    }

    #[test]
    fn test_diners() {
        assert_eq!(CardBrand::detect("30569309025904"), CardBrand::Diners);
        assert_eq!(CardBrand::detect("36006666333344"), CardBrand::Diners);
    }

    #[test]
    fn test_hipercard_wins_shared_38_prefix() {
        assert_eq!(CardBrand::detect("6062825624254001"), CardBrand::Hipercard);
        assert_eq!(CardBrand::detect("3841001111222233"), CardBrand::Hipercard);
        // Bare 38 without the Hipercard continuation stays Diners
        assert_eq!(CardBrand::detect("38520000023237"), CardBrand::Diners);
    }

    #[test]
    fn test_elo() {
        assert_eq!(CardBrand::detect("6363680000457013"), CardBrand::Elo);
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(CardBrand::detect("9999999999999999"), CardBrand::Unknown);
        assert_eq!(CardBrand::detect(""), CardBrand::Unknown);
        assert_eq!(CardBrand::detect("abc"), CardBrand::Unknown);
    }

    #[test]
    fn test_punctuation_ignored() {
        assert_eq!(CardBrand::detect("4111 1111 1111 1111"), CardBrand::Visa);
        assert_eq!(CardBrand::detect("5555-5555-5555-4444"), CardBrand::Mastercard);
    }
}
