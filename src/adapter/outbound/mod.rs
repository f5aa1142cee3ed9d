//! Outbound adapters (driven side).

pub mod wise;
