//! Wise REST API client.
//!
//! Implements [`TransferProvider`] over the v1 REST API. Each operation is a
//! single request with no retry; the outer schedule is the retry policy.
//! Only `200 OK` counts as success.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::dto::{CreateQuoteBody, CreateTransferBody, WiseQuote, WiseRate, WiseTransfer};
use super::settings::WiseConfig;
use crate::domain::{CurrencyCode, Quote, QuoteId, Transfer, TransferId};
use crate::error::{ConfigError, GatewayError};
use crate::port::{QuoteRequest, TransferProvider, TransferQuery, TransferRequest};

/// Longest response body kept on an [`GatewayError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for the Wise REST API.
pub struct WiseClient {
    http: HttpClient,
    base_url: Url,
    api_token: String,
}

impl WiseClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the API URL does not parse as a base URL,
    /// no API token is configured or the HTTP client cannot be built with the
    /// configured timeouts.
    pub fn from_config(config: &WiseConfig) -> crate::error::Result<Self> {
        let base_url = parse_base_url(&config.api_url)?;
        let api_token = config
            .api_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingField {
                field: "REBOOK_API_TOKEN",
            })?;

        if config.http.timeout_ms == 0 || config.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .map_err(|err| ConfigError::InvalidValue {
                field: "http",
                reason: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    fn endpoint(&self, operation: &'static str, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Transport {
                operation,
                reason: format!("cannot build request path on {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Send a request and require `200 OK`.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport {
                operation,
                reason: describe_transport_error(&err),
            })?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "Provider responded");
        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::UnexpectedStatus {
            operation,
            status: status.as_u16(),
            body: truncate(&body),
        })
    }

    /// Send a request, require `200 OK` and decode the JSON body.
    async fn fetch<T>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(operation, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Transport {
                operation,
                reason: describe_transport_error(&err),
            })?;
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode {
            operation,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl TransferProvider for WiseClient {
    async fn list_open_transfers(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<Transfer>, GatewayError> {
        const OP: &str = "list_open_transfers";
        let mut url = self.endpoint(OP, &["v1", "transfers"])?;
        url.query_pairs_mut()
            .append_pair("limit", &query.limit.to_string())
            .append_pair("offset", &query.offset.to_string())
            .append_pair("status", &query.status);

        debug!(url = %url, "Listing open transfers");
        let transfers: Vec<WiseTransfer> = self.fetch(OP, self.request(Method::GET, url)).await?;
        transfers
            .into_iter()
            .map(|t| Transfer::try_from(t).map_err(|err| decode_error(OP, &err)))
            .collect()
    }

    async fn get_quote_detail(&self, quote_id: &QuoteId) -> Result<Quote, GatewayError> {
        const OP: &str = "get_quote_detail";
        let url = self.endpoint(OP, &["v1", "quotes", quote_id.as_str()])?;

        debug!(url = %url, "Fetching quote detail");
        let quote: WiseQuote = self.fetch(OP, self.request(Method::GET, url)).await?;
        Quote::try_from(quote).map_err(|err| decode_error(OP, &err))
    }

    async fn get_live_rate(
        &self,
        source: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Decimal, GatewayError> {
        const OP: &str = "get_live_rate";
        let mut url = self.endpoint(OP, &["v1", "rates"])?;
        url.query_pairs_mut()
            .append_pair("source", source.as_str())
            .append_pair("target", target.as_str());

        debug!(url = %url, "Fetching live rate");
        let rates: Vec<WiseRate> = self.fetch(OP, self.request(Method::GET, url)).await?;
        let rate = rates.into_iter().next().ok_or(GatewayError::Decode {
            operation: OP,
            reason: "empty rate list".into(),
        })?;

        let pair_matches = side_matches(rate.source.as_deref(), source)
            && side_matches(rate.target.as_deref(), target);
        if !pair_matches {
            return Err(GatewayError::Decode {
                operation: OP,
                reason: format!(
                    "rate is for {}->{}, expected {source}->{target}",
                    rate.source.unwrap_or_default(),
                    rate.target.unwrap_or_default()
                ),
            });
        }
        if rate.rate <= Decimal::ZERO {
            return Err(GatewayError::Decode {
                operation: OP,
                reason: format!("non-positive rate {}", rate.rate),
            });
        }
        Ok(rate.rate)
    }

    async fn create_quote(&self, request: &QuoteRequest) -> Result<Quote, GatewayError> {
        const OP: &str = "create_quote";
        let url = self.endpoint(OP, &["v1", "quotes"])?;
        let body = CreateQuoteBody::from(request);

        debug!(
            source = %request.source,
            target = %request.target,
            amount = %request.source_amount,
            "Creating quote"
        );
        let quote: WiseQuote = self
            .fetch(OP, self.request(Method::POST, url).json(&body))
            .await?;
        Quote::try_from(quote).map_err(|err| decode_error(OP, &err))
    }

    async fn create_transfer(&self, request: &TransferRequest) -> Result<Transfer, GatewayError> {
        const OP: &str = "create_transfer";
        let url = self.endpoint(OP, &["v1", "transfers"])?;
        let body = CreateTransferBody::from(request);

        debug!(
            quote_id = %request.quote_id,
            customer_transaction_id = %request.idempotency_token,
            "Creating transfer"
        );
        let transfer: WiseTransfer = self
            .fetch(OP, self.request(Method::POST, url).json(&body))
            .await?;
        Transfer::try_from(transfer).map_err(|err| decode_error(OP, &err))
    }

    async fn cancel_transfer(&self, transfer_id: &TransferId) -> Result<(), GatewayError> {
        const OP: &str = "cancel_transfer";
        let url = self.endpoint(OP, &["v1", "transfers", transfer_id.as_str(), "cancel"])?;

        debug!(url = %url, "Cancelling transfer");
        self.send(OP, self.request(Method::PUT, url)).await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "Wise"
    }
}

fn parse_base_url(raw: &str) -> crate::error::Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "api_url",
        reason,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("'{raw}' is not an http(s) base URL")).into());
    }
    Ok(url)
}

/// A side the provider left out of the response is taken as matching.
fn side_matches(reported: Option<&str>, expected: &CurrencyCode) -> bool {
    reported.map_or(true, |code| code == expected.as_str())
}

fn decode_error(operation: &'static str, err: &impl std::fmt::Display) -> GatewayError {
    GatewayError::Decode {
        operation,
        reason: err.to_string(),
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
