//! Brazilian CEP (postal code) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cep`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The input does not contain exactly 8 digits.
    #[error("CEP must have exactly 8 digits")]
    WrongLength,
}

/// A Brazilian postal code, stored in canonical 8-digit form.
///
/// Accepts the punctuated form (`01310-100`) and the bare form
/// (`01310100`); everything that is not a digit is stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cep(String);

impl Cep {
    /// Parse a `Cep` from a string, punctuated or not.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::WrongLength`] if the input does not normalize
    /// to exactly 8 digits.
    pub fn parse(s: &str) -> Result<Self, CepError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != 8 {
            return Err(CepError::WrongLength);
        }

        Ok(Self(digits))
    }

    /// Returns the canonical 8-digit form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cep` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cep {
    type Err = CepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
