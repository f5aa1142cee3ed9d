//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct. Configuration is loaded from a TOML
//! file, with environment variable overrides for the API token (which is
//! never read from the file), the margin and the fallback source amount.
//!
//! # Example
//!
//! ```no_run
//! use rebook::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::wise::WiseConfig;
use crate::domain::decision::Margin;
use crate::error::{ConfigError, Result};

/// Environment variable holding the provider API token.
pub const API_TOKEN_ENV: &str = "REBOOK_API_TOKEN";
/// Environment variable overriding `strategy.margin`.
pub const MARGIN_ENV: &str = "REBOOK_MARGIN";
/// Environment variable overriding `strategy.source_amount`.
pub const SOURCE_AMOUNT_ENV: &str = "REBOOK_SOURCE_AMOUNT";

/// Rebooking policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyConfig {
    /// Minimum rate improvement before a transfer is rebooked.
    ///
    /// Defaults to zero: any improvement triggers a rebooking.
    #[serde(default)]
    pub margin: Margin,

    /// Source amount to quote with when the booked transfer has no quote.
    #[serde(default)]
    pub source_amount: Option<Decimal>,
}

/// Periodic trigger settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between workflow runs.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    120
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Main application configuration.
///
/// Built once at startup and passed by reference into the workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Provider connection and account settings.
    #[serde(default)]
    pub provider: WiseConfig,

    /// Rebooking policy.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Periodic trigger settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, an override does not parse
    /// or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content, reading overrides through
    /// `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::parse_toml`].
    pub fn parse_toml_with_env<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or
    /// [`Config::parse_toml`] fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Secrets are never read from the file.
        self.provider.api_token = lookup(API_TOKEN_ENV).filter(|token| !token.trim().is_empty());

        if let Some(raw) = lookup(MARGIN_ENV) {
            self.strategy.margin =
                Margin::from_str(&raw).map_err(|err| ConfigError::InvalidValue {
                    field: "margin",
                    reason: err.to_string(),
                })?;
        }

        if let Some(raw) = lookup(SOURCE_AMOUNT_ENV).filter(|raw| !raw.trim().is_empty()) {
            let amount = Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
                field: "source_amount",
                reason: format!("'{raw}' is not a decimal number"),
            })?;
            self.strategy.source_amount = Some(amount);
        }

        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let provider = &self.provider;
        if provider.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if let Err(err) = url::Url::parse(&provider.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: err.to_string(),
            }
            .into());
        }
        if provider.profile_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "profile_id",
            }
            .into());
        }
        if provider.api_token.is_none() {
            return Err(ConfigError::MissingField {
                field: API_TOKEN_ENV,
            }
            .into());
        }
        if provider.list_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "list_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if provider.http.timeout_ms == 0 || provider.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some(amount) = self.strategy.source_amount {
            if amount <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "source_amount",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }
        if self.schedule.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
