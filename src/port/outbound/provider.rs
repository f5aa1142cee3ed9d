//! Transfer provider port.
//!
//! One method per provider capability the rebooking workflow consumes. Every
//! call is exactly one network round trip with no retry, and every failure is
//! classified as transport, unexpected status or decode.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    AccountId, CurrencyCode, ProfileId, Quote, QuoteId, Transfer, TransferDetails, TransferId,
};
use crate::error::GatewayError;

/// Filter and page for listing open transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferQuery {
    /// Provider status the transfers must be in.
    pub status: String,
    pub limit: u32,
    pub offset: u32,
}

impl Default for TransferQuery {
    fn default() -> Self {
        Self {
            status: "incoming_payment_waiting".into(),
            limit: 3,
            offset: 0,
        }
    }
}

/// Parameters for a new rate-locking quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub profile: ProfileId,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub source_amount: Decimal,
}

/// Parameters for booking a transfer against a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub target_account: AccountId,
    pub quote_id: QuoteId,
    /// Lets the provider recognise a replayed create.
    pub idempotency_token: Uuid,
    pub details: TransferDetails,
}

/// Gateway to the money-transfer provider.
#[async_trait]
pub trait TransferProvider: Send + Sync {
    /// List transfers matching the query, in provider order.
    async fn list_open_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<Transfer>, GatewayError>;

    /// Fetch a quote by id.
    async fn get_quote_detail(&self, quote_id: &QuoteId) -> Result<Quote, GatewayError>;

    /// Fetch the current market rate for `source -> target`.
    async fn get_live_rate(
        &self,
        source: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, GatewayError>;

    /// Create a new quote. Mutates provider state.
    async fn create_quote(&self, request: &QuoteRequest) -> Result<Quote, GatewayError>;

    /// Book a transfer against a quote. Mutates provider state.
    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer, GatewayError>;

    /// Cancel a transfer. Mutates provider state.
    async fn cancel_transfer(&self, transfer_id: &TransferId) -> Result<(), GatewayError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}
