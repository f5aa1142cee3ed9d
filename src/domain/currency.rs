//! ISO-style currency codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A three-letter uppercase currency code such as `EUR` or `INR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        let valid = code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase());
        if valid {
            Ok(Self(code))
        } else {
            Err(DomainError::InvalidCurrency { code })
        }
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = DomainError;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        Self::try_from(code.to_string())
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_uppercase_letters() {
        let code = CurrencyCode::try_from("GBP").unwrap();
        assert_eq!(code.as_str(), "GBP");
    }

    #[test]
    fn rejects_wrong_length_or_case() {
        for bad in ["", "EU", "EURO", "eur", "E1R", "€UR"] {
            assert!(
                CurrencyCode::try_from(bad).is_err(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn decoding_fails_closed() {
        assert!(serde_json::from_str::<CurrencyCode>("\"usd\"").is_err());
        assert!(serde_json::from_str::<CurrencyCode>("978").is_err());
        let code: CurrencyCode = serde_json::from_str("\"INR\"").unwrap();
        assert_eq!(code.to_string(), "INR");
    }
}
