//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] - `ScriptedProvider`, an in-memory
//!   [`TransferProvider`](crate::port::TransferProvider) with a call log.
//! - [`domain`] - Builders for transfers, quotes and currencies.
//! - [`config`] - Canonical test configurations.
//! - [`http`] - One-shot local HTTP responder for the provider client.
//! - [`logs`] - In-memory capture of formatted log events.

pub mod config;
pub mod domain;
pub mod http;
pub mod logs;
pub mod provider;
