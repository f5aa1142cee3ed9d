//! Scripted in-memory [`TransferProvider`].
//!
//! Every operation returns a scripted response and records the call, so
//! tests can assert both on the outcome of a run and on which provider
//! calls it made.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{CurrencyCode, Quote, QuoteId, Transfer, TransferId};
use crate::error::GatewayError;
use crate::port::{QuoteRequest, TransferProvider, TransferQuery, TransferRequest};

/// A provider call as observed by [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    ListOpenTransfers(TransferQuery),
    GetQuoteDetail(QuoteId),
    GetLiveRate(CurrencyCode, CurrencyCode),
    CreateQuote(QuoteRequest),
    CreateTransfer(TransferRequest),
    CancelTransfer(TransferId),
}

impl ProviderCall {
    /// True for calls that change provider-side state.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::CreateQuote(_) | Self::CreateTransfer(_) | Self::CancelTransfer(_)
        )
    }

    /// Short operation name, matching the gateway's operation labels.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::ListOpenTransfers(_) => "list_open_transfers",
            Self::GetQuoteDetail(_) => "get_quote_detail",
            Self::GetLiveRate(..) => "get_live_rate",
            Self::CreateQuote(_) => "create_quote",
            Self::CreateTransfer(_) => "create_transfer",
            Self::CancelTransfer(_) => "cancel_transfer",
        }
    }
}

fn not_scripted(operation: &'static str) -> GatewayError {
    GatewayError::Decode {
        operation,
        reason: "no scripted response".into(),
    }
}

/// Build a transport failure for `operation`.
pub fn transport_failure(operation: &'static str) -> GatewayError {
    GatewayError::Transport {
        operation,
        reason: "connection reset by peer".into(),
    }
}

/// Build an unexpected-status failure for `operation`.
pub fn status_failure(operation: &'static str, status: u16) -> GatewayError {
    GatewayError::UnexpectedStatus {
        operation,
        status,
        body: r#"{"errors":[{"code":"error.generic"}]}"#.into(),
    }
}

/// Build a decode failure for `operation`.
pub fn decode_failure(operation: &'static str) -> GatewayError {
    GatewayError::Decode {
        operation,
        reason: "missing field `rate`".into(),
    }
}

/// In-memory provider with scripted responses and a call log.
pub struct ScriptedProvider {
    transfers: Result<Vec<Transfer>, GatewayError>,
    quote_detail: Result<Quote, GatewayError>,
    live_rate: Result<Decimal, GatewayError>,
    created_quote: Result<Quote, GatewayError>,
    created_transfer: Result<Transfer, GatewayError>,
    cancel: Result<(), GatewayError>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            transfers: Ok(Vec::new()),
            quote_detail: Err(not_scripted("get_quote_detail")),
            live_rate: Err(not_scripted("get_live_rate")),
            created_quote: Err(not_scripted("create_quote")),
            created_transfer: Err(not_scripted("create_transfer")),
            cancel: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_transfers(mut self, transfers: Vec<Transfer>) -> Self {
        self.transfers = Ok(transfers);
        self
    }

    #[must_use]
    pub fn with_quote_detail(mut self, quote: Quote) -> Self {
        self.quote_detail = Ok(quote);
        self
    }

    #[must_use]
    pub fn with_live_rate(mut self, rate: Decimal) -> Self {
        self.live_rate = Ok(rate);
        self
    }

    #[must_use]
    pub fn with_created_quote(mut self, quote: Quote) -> Self {
        self.created_quote = Ok(quote);
        self
    }

    #[must_use]
    pub fn with_created_transfer(mut self, transfer: Transfer) -> Self {
        self.created_transfer = Ok(transfer);
        self
    }

    /// Make the named operation fail with `error`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown operation name.
    #[must_use]
    pub fn failing(mut self, operation: &str, error: GatewayError) -> Self {
        match operation {
            "list_open_transfers" => self.transfers = Err(error),
            "get_quote_detail" => self.quote_detail = Err(error),
            "get_live_rate" => self.live_rate = Err(error),
            "create_quote" => self.created_quote = Err(error),
            "create_transfer" => self.created_transfer = Err(error),
            "cancel_transfer" => self.cancel = Err(error),
            other => panic!("unknown provider operation '{other}'"),
        }
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().clone()
    }

    /// Operation names of all calls made so far, in order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.lock().iter().map(ProviderCall::operation).collect()
    }

    /// Number of calls that changed provider-side state.
    pub fn mutating_calls(&self) -> usize {
        self.lock().iter().filter(|c| c.is_mutating()).count()
    }

    fn record(&self, call: ProviderCall) {
        self.lock().push(call);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProviderCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl TransferProvider for ScriptedProvider {
    async fn list_open_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<Transfer>, GatewayError> {
        self.record(ProviderCall::ListOpenTransfers(query.clone()));
        self.transfers.clone()
    }

    async fn get_quote_detail(&self, quote_id: &QuoteId) -> Result<Quote, GatewayError> {
        self.record(ProviderCall::GetQuoteDetail(quote_id.clone()));
        self.quote_detail.clone()
    }

    async fn get_live_rate(
        &self,
        source: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, GatewayError> {
        self.record(ProviderCall::GetLiveRate(source.clone(), target.clone()));
        self.live_rate.clone()
    }

    async fn create_quote(&self, request: &QuoteRequest) -> Result<Quote, GatewayError> {
        self.record(ProviderCall::CreateQuote(request.clone()));
        self.created_quote.clone()
    }

    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer, GatewayError> {
        self.record(ProviderCall::CreateTransfer(request.clone()));
        self.created_transfer.clone()
    }

    async fn cancel_transfer(&self, transfer_id: &TransferId) -> Result<(), GatewayError> {
        self.record(ProviderCall::CancelTransfer(transfer_id.clone()));
        self.cancel.clone()
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
