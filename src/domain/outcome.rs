//! Workflow stages and the terminal outcome of one run.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::decision::DecisionReason;
use super::id::TransferId;
use crate::error::ErrorKind;

/// States of one rebooking run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Select,
    FetchDetail,
    FetchLiveRate,
    Compare,
    GenerateQuote,
    CreateTransfer,
    CancelOldTransfer,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::FetchDetail => "FETCH_DETAIL",
            Self::FetchLiveRate => "FETCH_LIVE_RATE",
            Self::Compare => "COMPARE",
            Self::GenerateQuote => "GENERATE_QUOTE",
            Self::CreateTransfer => "CREATE_TRANSFER",
            Self::CancelOldTransfer => "CANCEL_OLD_TRANSFER",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A superseded transfer that could not be cancelled after a rebooking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancellationFailure {
    pub transfer_id: TransferId,
    pub kind: ErrorKind,
    pub cause: String,
}

/// The sole externally observable result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The live rate did not justify rebooking.
    NoAction {
        transfer_id: TransferId,
        reason: DecisionReason,
        booked_rate: Decimal,
        live_rate: Decimal,
    },
    /// A replacement transfer exists at a better rate.
    Rebooked {
        old_transfer_id: TransferId,
        new_transfer_id: TransferId,
        new_rate: Decimal,
        source_amount: Decimal,
        /// Set when the superseded transfer is still open at the provider.
        #[serde(skip_serializing_if = "Option::is_none")]
        cancellation_failure: Option<CancellationFailure>,
    },
    /// The run stopped before any provider-side mutation.
    Failed {
        stage: Stage,
        kind: ErrorKind,
        cause: String,
    },
}

impl Outcome {
    /// Success/error split for front ends that need one.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoAction { .. } => "no_action",
            Self::Rebooked { .. } => "rebooked",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAction {
                transfer_id,
                reason,
                booked_rate,
                live_rate,
            } => write!(
                f,
                "NO ACTION NEEDED || Transfer ID: {transfer_id} | Booked rate: {booked_rate} | Live rate: {live_rate} | {reason} ||"
            ),
            Self::Rebooked {
                old_transfer_id,
                new_transfer_id,
                new_rate,
                source_amount,
                cancellation_failure,
            } => {
                write!(
                    f,
                    "NEW TRANSFER BOOKED || Transfer ID: {new_transfer_id} | Replaces: {old_transfer_id} | Amount: {source_amount} | Rate: {new_rate} ||"
                )?;
                if let Some(failure) = cancellation_failure {
                    write!(
                        f,
                        " old transfer {} still open ({}: {})",
                        failure.transfer_id, failure.kind, failure.cause
                    )?;
                }
                Ok(())
            }
            Self::Failed { stage, kind, cause } => {
                write!(f, "REBOOKING FAILED || Stage: {stage} | {kind}: {cause} ||")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn stage_renders_screaming_snake_case() {
        assert_eq!(Stage::FetchLiveRate.to_string(), "FETCH_LIVE_RATE");
        assert_eq!(
            serde_json::to_value(Stage::CancelOldTransfer).unwrap(),
            "CANCEL_OLD_TRANSFER"
        );
    }

    #[test]
    fn failed_outcome_serializes_with_tag() {
        let outcome = Outcome::Failed {
            stage: Stage::Select,
            kind: ErrorKind::NoManageableTransfer,
            cause: "no manageable transfer exists".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["stage"], "SELECT");
        assert_eq!(json["kind"], "NoManageableTransfer");
        assert!(!outcome.is_success());
    }

    #[test]
    fn rebooked_omits_absent_cancellation_failure() {
        let outcome = Outcome::Rebooked {
            old_transfer_id: TransferId::from("1"),
            new_transfer_id: TransferId::from("2"),
            new_rate: dec!(88.9),
            source_amount: dec!(1000),
            cancellation_failure: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "rebooked");
        assert!(json.get("cancellation_failure").is_none());
        assert!(outcome.is_success());
        assert_eq!(outcome.label(), "rebooked");
    }

    #[test]
    fn no_action_display_names_transfer_and_rates() {
        let outcome = Outcome::NoAction {
            transfer_id: TransferId::from("77"),
            reason: DecisionReason::BelowMargin {
                delta: dec!(0.0001)
            },
            booked_rate: dec!(0.0120),
            live_rate: dec!(0.0121),
        };
        let text = outcome.to_string();
        assert!(text.starts_with("NO ACTION NEEDED"));
        assert!(text.contains("Transfer ID: 77"));
        assert!(text.contains("0.0121"));
    }
}
