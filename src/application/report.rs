//! Outcome reporting.
//!
//! Every run ends in exactly one [`Outcome`]; this module is the single place
//! that turns it into log lines.

use tracing::{error, info, warn};

use crate::domain::Outcome;

/// Log the outcome of one run.
pub fn report(outcome: &Outcome) {
    match outcome {
        Outcome::NoAction {
            transfer_id,
            booked_rate,
            live_rate,
            ..
        } => info!(
            outcome = outcome.label(),
            transfer_id = %transfer_id,
            booked_rate = %booked_rate,
            live_rate = %live_rate,
            "{outcome}"
        ),
        Outcome::Rebooked {
            old_transfer_id,
            new_transfer_id,
            new_rate,
            cancellation_failure,
            ..
        } => {
            info!(
                outcome = outcome.label(),
                old_transfer_id = %old_transfer_id,
                new_transfer_id = %new_transfer_id,
                new_rate = %new_rate,
                "{outcome}"
            );
            if let Some(failure) = cancellation_failure {
                warn!(
                    transfer_id = %failure.transfer_id,
                    kind = %failure.kind,
                    cause = %failure.cause,
                    "Superseded transfer could not be cancelled and is still open"
                );
            }
        }
        Outcome::Failed { stage, kind, .. } if kind.is_benign() => {
            info!(outcome = outcome.label(), stage = %stage, kind = %kind, "{outcome}");
        }
        Outcome::Failed { stage, kind, .. } => {
            error!(outcome = outcome.label(), stage = %stage, kind = %kind, "{outcome}");
        }
    }
}
