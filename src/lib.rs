//! Rebook - rate-arbitrage rebooking for pending currency transfers.
//!
//! Watches the booked-but-unfunded transfers on a money-transfer account and,
//! when the live exchange rate beats the booked rate by at least a
//! configured margin, books a replacement transfer at the better rate and
//! cancels the old one.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Transfers, quotes, the rate comparison and run outcomes
//! - [`port`] - The [`TransferProvider`](port::TransferProvider) gateway trait
//! - [`adapter`] - The Wise REST client and the command-line front end
//! - [`application`] - The rebooking workflow, outcome reporting and scheduler
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use rebook::infrastructure::bootstrap;
//! use rebook::infrastructure::config::Config;
//!
//! # async fn demo() -> rebook::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let service = bootstrap::build_service(&config)?;
//! let outcome = service.run().await;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
