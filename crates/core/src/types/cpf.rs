//! Brazilian CPF (national tax id) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cpf`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// The input does not contain exactly 11 digits.
    #[error("CPF must have exactly 11 digits")]
    WrongLength,
    /// All 11 digits are identical (e.g. 111.111.111-11), which passes the
    /// checksum arithmetic but is not an assignable CPF.
    #[error("CPF digits cannot all be identical")]
    RepeatedDigits,
    /// One of the two verification digits does not match.
    #[error("CPF verification digits do not match")]
    InvalidCheckDigit,
}

/// A validated Brazilian CPF, stored in canonical digit-only form.
///
/// `parse` accepts the common punctuated form (`123.456.789-09`) as well as
/// the bare 11-digit form, strips everything that is not a digit, and
/// verifies both check digits:
///
/// - digit 10 checks digits 1-9 weighted 10 down to 2
/// - digit 11 checks digits 1-10 weighted 11 down to 2
///
/// Each weighted sum `s` must satisfy `(s * 10) % 11` equal to the check
/// digit, with remainders 10 and 11 mapped to 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Parse a `Cpf` from a string, punctuated or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not contain exactly 11 digits,
    /// has all digits identical, or fails either check digit.
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

        if digits.len() != 11 {
            return Err(CpfError::WrongLength);
        }

        if digits.iter().all(|&d| d == digits[0]) {
            return Err(CpfError::RepeatedDigits);
        }

        if check_digit(&digits[..9], 10) != digits[9] {
            return Err(CpfError::InvalidCheckDigit);
        }

        if check_digit(&digits[..10], 11) != digits[10] {
            return Err(CpfError::InvalidCheckDigit);
        }

        let canonical: String = digits
            .iter()
            .map(|&d| char::from_digit(d, 10).unwrap_or('0'))
            .collect();

        Ok(Self(canonical))
    }

    /// Returns the canonical 11-digit form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cpf` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Compute a CPF check digit over `digits` with weights starting at
/// `first_weight` and descending to 2.
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(&d, w)| d * w)
        .sum();

    let remainder = (sum * 10) % 11;
    if remainder >= 10 { 0 } else { remainder }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
