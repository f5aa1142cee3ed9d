use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to the transfer provider.
///
/// The three variants are deliberately distinct: callers need to tell a
/// request that never completed apart from one the provider rejected, and
/// both apart from a response whose shape did not match the schema.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("{operation}: transport failure: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: unexpected status {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation}: failed to decode response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },
}

impl GatewayError {
    /// Name of the provider operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::UnexpectedStatus { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("no manageable transfer exists")]
    NoManageableTransfer,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failure as reported on a `failed` outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ConfigInvalid,
    NoManageableTransfer,
    TransportFailure,
    UnexpectedStatus,
    DecodeFailure,
}

impl ErrorKind {
    /// Benign kinds describe an expected idle state rather than a fault.
    #[must_use]
    pub const fn is_benign(self) -> bool {
        matches!(self, Self::NoManageableTransfer)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigInvalid => "ConfigInvalid",
            Self::NoManageableTransfer => "NoManageableTransfer",
            Self::TransportFailure => "TransportFailure",
            Self::UnexpectedStatus => "UnexpectedStatus",
            Self::DecodeFailure => "DecodeFailure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&GatewayError> for ErrorKind {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Transport { .. } => Self::TransportFailure,
            GatewayError::UnexpectedStatus { .. } => Self::UnexpectedStatus,
            GatewayError::Decode { .. } => Self::DecodeFailure,
        }
    }
}

impl Error {
    /// Classify this error for outcome reporting.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::ConfigInvalid,
            Self::NoManageableTransfer => ErrorKind::NoManageableTransfer,
            Self::Gateway(err) => ErrorKind::from(err),
            // Domain violations only surface while validating provider payloads.
            Self::Domain(_) => ErrorKind::DecodeFailure,
        }
    }
}
