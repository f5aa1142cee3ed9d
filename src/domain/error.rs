//! Domain validation errors.
//!
//! These errors are raised when a value handed to the domain violates one of
//! its invariants: currency codes are three uppercase letters, amounts are
//! never negative, rates are strictly positive and margins are non-negative.
//!
//! # Examples
//!
//! ```
//! use rebook::domain::currency::CurrencyCode;
//! use rebook::domain::error::DomainError;
//!
//! let result = CurrencyCode::try_from("usd");
//! assert!(matches!(result, Err(DomainError::InvalidCurrency { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Currency codes must be exactly three ASCII uppercase letters.
    #[error("invalid currency code '{code}'")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// Monetary amounts cannot be negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount {
        /// Which amount was rejected.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// Exchange rates must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositiveRate {
        /// Which rate was rejected.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A rebooking margin below zero would accept worse rates.
    #[error("margin must be 0 or greater, got {value}")]
    NegativeMargin {
        /// The rejected margin.
        value: Decimal,
    },

    /// The margin text did not parse as a decimal.
    #[error("margin '{raw}' is not a decimal number")]
    UnparseableMargin {
        /// The rejected input.
        raw: String,
    },
}
