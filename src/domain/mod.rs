//! Provider-agnostic domain logic: transfers, quotes, the rate comparison and
//! the outcome of a run.

pub mod currency;
pub mod decision;
pub mod error;
pub mod id;
pub mod outcome;
pub mod selector;
pub mod transfer;

pub use currency::CurrencyCode;
pub use decision::{decide, Decision, DecisionReason, Margin};
pub use id::{AccountId, ProfileId, QuoteId, TransferId};
pub use outcome::{CancellationFailure, Outcome, Stage};
pub use selector::select_best;
pub use transfer::{Quote, Transfer, TransferDetails};
