//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        ┌──────────────────────────┐
//!        │       Application        │
//!        │  (rebooking, scheduler)  │
//!        └────────────┬─────────────┘
//!                     │ TransferProvider
//!                     ▼
//!              ┌─────────────┐
//!              │  Provider   │
//!              │   Adapter   │
//!              └─────────────┘
//! ```

pub mod outbound;

pub use outbound::provider::{TransferProvider, TransferQuery, QuoteRequest, TransferRequest};
