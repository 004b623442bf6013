//! Brazilian phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input does not contain 10 or 11 digits.
    #[error("phone must have 10 or 11 digits including the area code")]
    WrongLength,
    /// The two-digit area code starts with zero.
    #[error("phone area code cannot start with zero")]
    InvalidAreaCode,
}

/// A Brazilian phone number, stored as digits only.
///
/// Accepts punctuated input such as `(11) 98765-4321` and strips it down
/// to the canonical digit-only form. Landlines carry 10 digits, mobile
/// numbers 11; both include the two-digit area code, which never starts
/// with zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string, punctuated or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not normalize to 10 or 11
    /// digits, or if the area code starts with zero.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != 10 && digits.len() != 11 {
            return Err(PhoneError::WrongLength);
        }

        if digits.starts_with('0') {
            return Err(PhoneError::InvalidAreaCode);
        }

        Ok(Self(digits))
    }

    /// Returns the canonical digit-only form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
