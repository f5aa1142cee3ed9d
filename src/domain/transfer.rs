//! Booked transfers and the quotes that lock their rate.

use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::CurrencyCode;
use super::error::DomainError;
use super::id::{AccountId, ProfileId, QuoteId, TransferId};

/// Free-form details carried by a transfer and copied onto its replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferDetails {
    /// Reference text shown to the recipient.
    pub reference: Option<String>,
    /// Declared purpose of the transfer.
    pub transfer_purpose: Option<String>,
    /// Declared origin of the funds.
    pub source_of_funds: Option<String>,
}

/// A transfer held at the provider, waiting for incoming funds.
///
/// Transfers are never mutated by this crate. Rebooking creates a new one
/// and cancels the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub id: TransferId,
    pub target_account: AccountId,
    /// Amount in the source currency, when the provider reports it.
    ///
    /// The authoritative amount lives on the quote; see
    /// [`Transfer::quote_id`].
    pub source_amount: Option<Decimal>,
    /// Rate locked when the transfer was booked.
    pub rate: Decimal,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    /// Quote the transfer was booked with, absent for legacy transfers.
    pub quote_id: Option<QuoteId>,
    pub details: TransferDetails,
}

impl Transfer {
    /// Check the amount and rate invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the rate is not positive or the amount is
    /// negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rate <= Decimal::ZERO {
            return Err(DomainError::NonPositiveRate {
                field: "rate",
                value: self.rate,
            });
        }
        if let Some(amount) = self.source_amount {
            if amount < Decimal::ZERO {
                return Err(DomainError::NegativeAmount {
                    field: "source_amount",
                    value: amount,
                });
            }
        }
        Ok(())
    }
}

/// A provider-issued proposal that locks a rate for one transfer.
///
/// Quotes are created fresh for every rebooking attempt and consumed by the
/// create-transfer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: QuoteId,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub source_amount: Decimal,
    pub rate: Decimal,
    pub profile: Option<ProfileId>,
}

impl Quote {
    /// Check the amount and rate invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the rate is not positive or the amount is
    /// negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rate <= Decimal::ZERO {
            return Err(DomainError::NonPositiveRate {
                field: "rate",
                value: self.rate,
            });
        }
        if self.source_amount < Decimal::ZERO {
            return Err(DomainError::NegativeAmount {
                field: "source_amount",
                value: self.source_amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transfer(rate: Decimal, amount: Option<Decimal>) -> Transfer {
        Transfer {
            id: TransferId::from("1"),
            target_account: AccountId::from("2"),
            source_amount: amount,
            rate,
            source_currency: CurrencyCode::try_from("EUR").unwrap(),
            target_currency: CurrencyCode::try_from("INR").unwrap(),
            quote_id: None,
            details: TransferDetails::default(),
        }
    }

    #[test]
    fn transfer_accepts_positive_rate_and_missing_amount() {
        assert!(transfer(dec!(88.41), None).validate().is_ok());
        assert!(transfer(dec!(88.41), Some(dec!(0))).validate().is_ok());
    }

    #[test]
    fn transfer_rejects_zero_rate() {
        assert_eq!(
            transfer(dec!(0), None).validate(),
            Err(DomainError::NonPositiveRate {
                field: "rate",
                value: dec!(0),
            })
        );
    }

    #[test]
    fn transfer_rejects_negative_amount() {
        assert!(matches!(
            transfer(dec!(1.1), Some(dec!(-5))).validate(),
            Err(DomainError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn quote_rejects_negative_amount() {
        let quote = Quote {
            id: QuoteId::from("9"),
            source: CurrencyCode::try_from("EUR").unwrap(),
            target: CurrencyCode::try_from("INR").unwrap(),
            source_amount: dec!(-1),
            rate: dec!(88.5),
            profile: None,
        };
        assert!(quote.validate().is_err());
    }
}
