//! Wise (formerly TransferWise) provider integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::WiseClient;
pub use settings::{WiseConfig, WiseHttpConfig};
