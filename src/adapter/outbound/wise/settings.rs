//! Wise provider configuration.

use serde::Deserialize;

use crate::port::TransferQuery;

/// Wise HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WiseHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for WiseHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}

/// Wise account and API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WiseConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Profile that owns new quotes.
    #[serde(default)]
    pub profile_id: String,
    /// Bearer token. Loaded from `REBOOK_API_TOKEN`, never from the file.
    #[serde(skip)]
    pub api_token: Option<String>,
    /// Transfer status that marks a transfer as booked and unfunded.
    #[serde(default = "default_status_filter")]
    pub status_filter: String,
    /// Page size when listing open transfers.
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
    #[serde(default)]
    pub http: WiseHttpConfig,
}

fn default_api_url() -> String {
    "https://api.transferwise.com".into()
}

fn default_status_filter() -> String {
    TransferQuery::default().status
}

fn default_list_limit() -> u32 {
    TransferQuery::default().limit
}

impl WiseConfig {
    /// Query used to list candidate transfers.
    #[must_use]
    pub fn transfer_query(&self) -> TransferQuery {
        TransferQuery {
            status: self.status_filter.clone(),
            limit: self.list_limit,
            offset: 0,
        }
    }
}

impl Default for WiseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            profile_id: String::new(),
            api_token: None,
            status_filter: default_status_filter(),
            list_limit: default_list_limit(),
            http: WiseHttpConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_provider_conventions() {
        let config = WiseConfig::default();
        assert_eq!(config.api_url, "https://api.transferwise.com");
        assert_eq!(config.http.timeout_ms, 10_000);

        let query = config.transfer_query();
        assert_eq!(query.status, "incoming_payment_waiting");
        assert_eq!(query.limit, 3);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn token_is_never_read_from_toml() {
        let config: WiseConfig = toml::from_str(
            r#"
api_url = "https://api.sandbox.transferwise.tech"
profile_id = "1200"
api_token = "from-file"
"#,
        )
        .unwrap();
        assert!(config.api_token.is_none());
        assert_eq!(config.profile_id, "1200");
    }
}
