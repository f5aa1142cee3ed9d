//! Rate comparison: should a booked transfer be rebooked at the live rate?
//!
//! The policy is one-sided. A higher live rate means more target currency
//! for the same source amount, so only a strictly higher live rate can
//! justify rebooking, and only when the improvement reaches the margin:
//!
//! ```text
//! act  <=>  live > booked  &&  live - booked >= margin
//! ```
//!
//! A margin of zero therefore means "any improvement at all".
//!
//! # Examples
//!
//! ```
//! use rebook::domain::decision::{decide, Margin};
//! use rust_decimal_macros::dec;
//!
//! let margin = Margin::new(dec!(0.0005)).unwrap();
//! assert!(decide(dec!(0.0120), dec!(0.0130), margin).act);
//! assert!(!decide(dec!(0.0120), dec!(0.0121), margin).act);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::DomainError;

/// Minimum favorable rate improvement that justifies rebooking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Margin(Decimal);

impl Margin {
    /// Any improvement, however small, triggers a rebooking.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a margin.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeMargin`] for values below zero.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO {
            return Err(DomainError::NegativeMargin { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl FromStr for Margin {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(raw.trim()).map_err(|_| DomainError::UnparseableMargin {
            raw: raw.to_string(),
        })?;
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Margin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Why a comparison came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Live rate beats the booked rate by at least the margin.
    Improved { delta: Decimal },
    /// Live rate is better, but not by enough.
    BelowMargin { delta: Decimal },
    /// Live rate is equal to or worse than the booked rate.
    NotImproved { delta: Decimal },
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improved { delta } => write!(f, "live rate improved by {delta}"),
            Self::BelowMargin { delta } => write!(f, "improvement of {delta} is below the margin"),
            Self::NotImproved { delta } => {
                write!(f, "live rate is not better than booked rate (delta {delta})")
            }
        }
    }
}

/// Outcome of one rate comparison. Lives only for the run that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub act: bool,
    pub reason: DecisionReason,
    pub booked_rate: Decimal,
    pub live_rate: Decimal,
    pub margin: Margin,
}

/// Compare the booked rate against the live rate.
#[must_use]
pub fn decide(booked_rate: Decimal, live_rate: Decimal, margin: Margin) -> Decision {
    let delta = live_rate - booked_rate;
    let reason = if live_rate <= booked_rate {
        DecisionReason::NotImproved { delta }
    } else if delta >= margin.value() {
        DecisionReason::Improved { delta }
    } else {
        DecisionReason::BelowMargin { delta }
    };

    Decision {
        act: matches!(reason, DecisionReason::Improved { .. }),
        reason,
        booked_rate,
        live_rate,
        margin,
    }
}
