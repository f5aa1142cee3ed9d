//! Builders for domain primitives used across tests.

use rust_decimal::Decimal;

use crate::domain::{
    AccountId, CurrencyCode, ProfileId, Quote, QuoteId, Transfer, TransferDetails, TransferId,
};

/// Create a [`CurrencyCode`] from a known-good literal.
pub fn ccy(code: &str) -> CurrencyCode {
    CurrencyCode::try_from(code).expect("valid currency code")
}

/// An INR -> EUR transfer with the given id and booked rate, booked via
/// quote `q-{id}`.
pub fn transfer(id: &str, rate: Decimal) -> Transfer {
    Transfer {
        id: TransferId::from(id),
        target_account: AccountId::from("7993919"),
        source_amount: None,
        rate,
        source_currency: ccy("INR"),
        target_currency: ccy("EUR"),
        quote_id: Some(QuoteId::from(format!("q-{id}"))),
        details: TransferDetails {
            reference: Some("rent".into()),
            transfer_purpose: None,
            source_of_funds: None,
        },
    }
}

/// Same as [`transfer`] but without a quote id.
pub fn legacy_transfer(id: &str, rate: Decimal) -> Transfer {
    Transfer {
        quote_id: None,
        ..transfer(id, rate)
    }
}

/// An INR -> EUR quote.
pub fn quote(id: &str, source_amount: Decimal, rate: Decimal) -> Quote {
    Quote {
        id: QuoteId::from(id),
        source: ccy("INR"),
        target: ccy("EUR"),
        source_amount,
        rate,
        profile: Some(ProfileId::from("1200")),
    }
}
