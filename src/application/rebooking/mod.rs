//! Rebooking use case: select, compare, and replace a booked transfer.

mod error;
mod service;

pub use error::StageError;
pub use service::{RebookingService, RebookingSettings};
