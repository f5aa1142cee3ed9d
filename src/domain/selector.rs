//! Picks the single transfer the workflow manages.

use super::transfer::Transfer;
use crate::error::{Error, Result};

/// Select the transfer with the highest booked rate.
///
/// Ties keep the earliest candidate, so the same list always yields the same
/// transfer.
///
/// # Errors
///
/// Returns [`Error::NoManageableTransfer`] when `candidates` is empty.
pub fn select_best(candidates: &[Transfer]) -> Result<&Transfer> {
    candidates
        .iter()
        .reduce(|best, candidate| {
            if candidate.rate > best.rate {
                candidate
            } else {
                best
            }
        })
        .ok_or(Error::NoManageableTransfer)
}
