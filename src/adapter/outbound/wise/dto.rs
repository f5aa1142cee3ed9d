//! Wise v1 wire shapes.
//!
//! Response types only name the fields the workflow needs; unknown fields
//! are ignored, but a missing or mistyped required field fails the decode.
//! Conversions into domain types re-check the domain invariants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::error::DomainError;
use crate::domain::{
    AccountId, CurrencyCode, ProfileId, Quote, QuoteId, Transfer, TransferDetails, TransferId,
};
use crate::port::{QuoteRequest, TransferRequest};

/// Free-form transfer details as sent and received.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WiseTransferDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_of_funds: Option<String>,
}

impl From<WiseTransferDetails> for TransferDetails {
    fn from(d: WiseTransferDetails) -> Self {
        Self {
            reference: d.reference,
            transfer_purpose: d.transfer_purpose,
            source_of_funds: d.source_of_funds,
        }
    }
}

impl From<&TransferDetails> for WiseTransferDetails {
    fn from(d: &TransferDetails) -> Self {
        Self {
            reference: d.reference.clone(),
            transfer_purpose: d.transfer_purpose.clone(),
            source_of_funds: d.source_of_funds.clone(),
        }
    }
}

/// Transfer as returned by `GET/POST v1/transfers`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiseTransfer {
    pub id: TransferId,
    pub target_account: AccountId,
    pub rate: Decimal,
    pub source_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    #[serde(default)]
    pub source_amount: Option<Decimal>,
    /// Older payloads carry the amount as `sourceValue`.
    #[serde(default)]
    pub source_value: Option<Decimal>,
    #[serde(default)]
    pub quote: Option<QuoteId>,
    #[serde(default)]
    pub details: Option<WiseTransferDetails>,
}

impl TryFrom<WiseTransfer> for Transfer {
    type Error = DomainError;

    fn try_from(t: WiseTransfer) -> Result<Self, Self::Error> {
        let transfer = Self {
            id: t.id,
            target_account: t.target_account,
            source_amount: t.source_amount.or(t.source_value),
            rate: t.rate,
            source_currency: t.source_currency,
            target_currency: t.target_currency,
            // Legacy transfers report quote 0 when they were not booked via a quote.
            quote_id: t.quote.filter(|q| q.as_str() != "0"),
            details: t.details.map(TransferDetails::from).unwrap_or_default(),
        };
        transfer.validate()?;
        Ok(transfer)
    }
}

/// Quote as returned by `GET/POST v1/quotes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiseQuote {
    pub id: QuoteId,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub source_amount: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub profile: Option<ProfileId>,
}

impl TryFrom<WiseQuote> for Quote {
    type Error = DomainError;

    fn try_from(q: WiseQuote) -> Result<Self, Self::Error> {
        let quote = Self {
            id: q.id,
            source: q.source,
            target: q.target,
            source_amount: q.source_amount,
            rate: q.rate,
            profile: q.profile,
        };
        quote.validate()?;
        Ok(quote)
    }
}

/// One element of the `GET v1/rates` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct WiseRate {
    pub rate: Decimal,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

/// Provider id as it goes on the wire: numeric ids as JSON numbers, anything
/// else as a string.
#[derive(Debug, Clone, Copy)]
pub struct WireId<'a>(pub &'a str);

impl Serialize for WireId<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(self.0),
        }
    }
}

/// Body of `POST v1/quotes`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteBody<'a> {
    pub profile: WireId<'a>,
    pub source: &'a str,
    pub target: &'a str,
    pub rate_type: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub source_amount: Decimal,
    #[serde(rename = "type")]
    pub quote_type: &'static str,
}

impl<'a> From<&'a QuoteRequest> for CreateQuoteBody<'a> {
    fn from(r: &'a QuoteRequest) -> Self {
        Self {
            profile: WireId(r.profile.as_str()),
            source: r.source.as_str(),
            target: r.target.as_str(),
            rate_type: "FIXED",
            source_amount: r.source_amount,
            quote_type: "REGULAR",
        }
    }
}

/// Body of `POST v1/transfers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferBody<'a> {
    pub target_account: WireId<'a>,
    pub quote: WireId<'a>,
    pub customer_transaction_id: String,
    pub details: WiseTransferDetails,
}

impl<'a> From<&'a TransferRequest> for CreateTransferBody<'a> {
    fn from(r: &'a TransferRequest) -> Self {
        Self {
            target_account: WireId(r.target_account.as_str()),
            quote: WireId(r.quote_id.as_str()),
            customer_transaction_id: r.idempotency_token.to_string(),
            details: WiseTransferDetails::from(&r.details),
        }
    }
}
