//! The rebooking workflow.
//!
//! One run walks a fixed sequence of stages:
//!
//! ```text
//! SELECT -> FETCH_DETAIL -> FETCH_LIVE_RATE -> COMPARE -> no_action
//!                                                 |
//!                                                 v
//!                    GENERATE_QUOTE -> CREATE_TRANSFER -> CANCEL_OLD_TRANSFER -> rebooked
//! ```
//!
//! Any failure before `CREATE_TRANSFER` succeeds ends the run as `failed`
//! with no provider-side transfer created. Once the replacement exists it is
//! never rolled back: a failed cancellation of the superseded transfer is
//! attached to the `rebooked` outcome instead.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::{AtStage, StageError};
use crate::domain::{
    decide, select_best, CancellationFailure, Margin, Outcome, ProfileId, Stage, Transfer,
};
use crate::error::{ConfigError, ErrorKind};
use crate::infrastructure::config::Config;
use crate::port::{QuoteRequest, TransferProvider, TransferQuery, TransferRequest};

/// Inputs to the workflow that stay fixed between runs.
#[derive(Debug, Clone)]
pub struct RebookingSettings {
    pub query: TransferQuery,
    /// Profile that owns replacement quotes.
    pub profile: ProfileId,
    pub margin: Margin,
    /// Source amount used when the booked transfer has no quote to read it from.
    pub fallback_source_amount: Option<Decimal>,
}

impl RebookingSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            query: config.provider.transfer_query(),
            profile: ProfileId::from(config.provider.profile_id.as_str()),
            margin: config.strategy.margin,
            fallback_source_amount: config.strategy.source_amount,
        }
    }
}

/// Runs the rebooking workflow against a provider.
///
/// Holds no state between runs. Callers must not run two workflows against
/// the same account at once; see [`RunGuard`](crate::application::scheduler::RunGuard).
pub struct RebookingService {
    provider: Arc<dyn TransferProvider>,
    settings: RebookingSettings,
}

impl RebookingService {
    pub fn new(provider: Arc<dyn TransferProvider>, settings: RebookingSettings) -> Self {
        Self { provider, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &RebookingSettings {
        &self.settings
    }

    /// Execute one run to completion.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn run(&self) -> Outcome {
        match self.execute().await {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(stage = %err.stage, error = %err.error, "Run aborted");
                err.into_outcome()
            }
        }
    }

    async fn execute(&self) -> Result<Outcome, StageError> {
        let candidates = self
            .provider
            .list_open_transfers(&self.settings.query)
            .await
            .at(Stage::Select)?;
        let booked = select_best(&candidates).at(Stage::Select)?.clone();
        debug!(
            stage = %Stage::Select,
            transfer_id = %booked.id,
            candidates = candidates.len(),
            booked_rate = %booked.rate,
            "Selected transfer"
        );

        let source_amount = self.resolve_source_amount(&booked).await?;

        let live_rate = self
            .provider
            .get_live_rate(&booked.source_currency, &booked.target_currency)
            .await
            .at(Stage::FetchLiveRate)?;

        let decision = decide(booked.rate, live_rate, self.settings.margin);
        debug!(
            stage = %Stage::Compare,
            transfer_id = %booked.id,
            booked_rate = %decision.booked_rate,
            live_rate = %decision.live_rate,
            margin = %decision.margin,
            act = decision.act,
            "Compared rates"
        );
        if !decision.act {
            return Ok(Outcome::NoAction {
                transfer_id: booked.id,
                reason: decision.reason,
                booked_rate: decision.booked_rate,
                live_rate: decision.live_rate,
            });
        }

        let quote = self
            .provider
            .create_quote(&QuoteRequest {
                profile: self.settings.profile.clone(),
                source: booked.source_currency.clone(),
                target: booked.target_currency.clone(),
                source_amount,
            })
            .await
            .at(Stage::GenerateQuote)?;
        debug!(
            stage = %Stage::GenerateQuote,
            quote_id = %quote.id,
            rate = %quote.rate,
            "Generated quote"
        );

        let replacement = self
            .provider
            .create_transfer(&TransferRequest {
                target_account: booked.target_account.clone(),
                quote_id: quote.id.clone(),
                idempotency_token: Uuid::new_v4(),
                details: booked.details.clone(),
            })
            .await
            .at(Stage::CreateTransfer)?;
        info!(
            stage = %Stage::CreateTransfer,
            old_transfer_id = %booked.id,
            new_transfer_id = %replacement.id,
            rate = %replacement.rate,
            "Replacement transfer created"
        );

        let cancellation_failure = match self.provider.cancel_transfer(&booked.id).await {
            Ok(()) => None,
            Err(err) => Some(CancellationFailure {
                transfer_id: booked.id.clone(),
                kind: ErrorKind::from(&err),
                cause: err.to_string(),
            }),
        };

        Ok(Outcome::Rebooked {
            old_transfer_id: booked.id,
            new_transfer_id: replacement.id,
            new_rate: replacement.rate,
            source_amount,
            cancellation_failure,
        })
    }

    /// Work out the amount the booked transfer moves.
    ///
    /// Preference order: the booked quote, the amount on the transfer itself,
    /// then the configured fallback.
    async fn resolve_source_amount(&self, booked: &Transfer) -> Result<Decimal, StageError> {
        if let Some(quote_id) = &booked.quote_id {
            let quote = self
                .provider
                .get_quote_detail(quote_id)
                .await
                .at(Stage::FetchDetail)?;
            return Ok(quote.source_amount);
        }

        booked
            .source_amount
            .or(self.settings.fallback_source_amount)
            .ok_or_else(|| {
                StageError::new(
                    Stage::FetchDetail,
                    ConfigError::InvalidValue {
                        field: "source_amount",
                        reason: format!(
                            "transfer {} has no quote and no source amount is configured",
                            booked.id
                        ),
                    },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecisionReason, TransferId};
    use crate::testkit::domain::{legacy_transfer, quote, transfer};
    use crate::testkit::provider::{
        decode_failure, status_failure, transport_failure, ProviderCall, ScriptedProvider,
    };
    use rust_decimal_macros::dec;

    fn settings(margin: Decimal) -> RebookingSettings {
        RebookingSettings {
            query: TransferQuery::default(),
            profile: ProfileId::from("1200"),
            margin: Margin::new(margin).unwrap(),
            fallback_source_amount: None,
        }
    }

    fn service(provider: &Arc<ScriptedProvider>, margin: Decimal) -> RebookingService {
        RebookingService::new(provider.clone(), settings(margin))
    }

    /// Provider scripted for a full, successful rebooking of `t-1`.
    fn rebookable() -> ScriptedProvider {
        ScriptedProvider::new()
            .with_transfers(vec![transfer("t-1", dec!(0.0120))])
            .with_quote_detail(quote("q-t-1", dec!(50000), dec!(0.0120)))
            .with_live_rate(dec!(0.0130))
            .with_created_quote(quote("q-new", dec!(50000), dec!(0.0130)))
            .with_created_transfer(transfer("t-2", dec!(0.0130)))
    }

    // ---------------------------------------------------------------------
    // Rate decisions
    // ---------------------------------------------------------------------

    #[tokio::test]
    async fn improvement_above_margin_rebooks() {
        let provider = Arc::new(rebookable());
        let outcome = service(&provider, dec!(0.0005)).run().await;

        assert_eq!(
            outcome,
            Outcome::Rebooked {
                old_transfer_id: TransferId::from("t-1"),
                new_transfer_id: TransferId::from("t-2"),
                new_rate: dec!(0.0130),
                source_amount: dec!(50000),
                cancellation_failure: None,
            }
        );
        assert_eq!(
            provider.operations(),
            vec![
                "list_open_transfers",
                "get_quote_detail",
                "get_live_rate",
                "create_quote",
                "create_transfer",
                "cancel_transfer",
            ]
        );
    }

    #[tokio::test]
    async fn improvement_below_margin_is_no_action() {
        let provider = Arc::new(rebookable().with_live_rate(dec!(0.0121)));
        let outcome = service(&provider, dec!(0.0005)).run().await;

        match outcome {
            Outcome::NoAction {
                transfer_id,
                reason,
                booked_rate,
                live_rate,
            } => {
                assert_eq!(transfer_id.as_str(), "t-1");
                assert_eq!(
                    reason,
                    DecisionReason::BelowMargin {
                        delta: dec!(0.0001)
                    }
                );
                assert_eq!(booked_rate, dec!(0.0120));
                assert_eq!(live_rate, dec!(0.0121));
            }
            other => panic!("Expected no_action, got {other:?}"),
        }
        assert_eq!(provider.mutating_calls(), 0);
    }

    #[tokio::test]
    async fn worse_live_rate_is_no_action() {
        let provider = Arc::new(rebookable().with_live_rate(dec!(0.0110)));
        let outcome = service(&provider, Decimal::ZERO).run().await;

        assert_eq!(outcome.label(), "no_action");
        assert_eq!(provider.mutating_calls(), 0);
    }

    #[tokio::test]
    async fn zero_margin_acts_on_any_improvement() {
        let provider = Arc::new(rebookable().with_live_rate(dec!(0.01200001)));
        let outcome = service(&provider, Decimal::ZERO).run().await;

        assert_eq!(outcome.label(), "rebooked");
    }

    #[tokio::test]
    async fn highest_rated_transfer_is_managed() {
        let provider = Arc::new(rebookable().with_transfers(vec![
            transfer("t-low", dec!(0.0110)),
            transfer("t-high", dec!(0.0125)),
            transfer("t-mid", dec!(0.0120)),
        ]));
        let outcome = service(&provider, Decimal::ZERO).run().await;

        match outcome {
            Outcome::Rebooked {
                old_transfer_id, ..
            } => assert_eq!(old_transfer_id.as_str(), "t-high"),
            other => panic!("Expected rebooked, got {other:?}"),
        }
        assert!(provider
            .calls()
            .contains(&ProviderCall::CancelTransfer(TransferId::from("t-high"))));
    }

    // ---------------------------------------------------------------------
    // Failures before mutation
    // ---------------------------------------------------------------------

    #[tokio::test]
    async fn empty_list_fails_at_select() {
        let provider = Arc::new(rebookable().with_transfers(Vec::new()));
        let outcome = service(&provider, Decimal::ZERO).run().await;

        match outcome {
            Outcome::Failed { stage, kind, .. } => {
                assert_eq!(stage, Stage::Select);
                assert_eq!(kind, ErrorKind::NoManageableTransfer);
            }
            other => panic!("Expected failed, got {other:?}"),
        }
        assert_eq!(provider.operations(), vec!["list_open_transfers"]);
    }

    #[tokio::test]
    async fn each_pre_create_failure_is_attributed_and_mutates_nothing() {
        let cases = [
            ("list_open_transfers", Stage::Select),
            ("get_quote_detail", Stage::FetchDetail),
            ("get_live_rate", Stage::FetchLiveRate),
            ("create_quote", Stage::GenerateQuote),
        ];

        for (operation, expected_stage) in cases {
            let provider = Arc::new(rebookable().failing(operation, transport_failure(operation)));
            let outcome = service(&provider, Decimal::ZERO).run().await;

            match outcome {
                Outcome::Failed { stage, kind, .. } => {
                    assert_eq!(stage, expected_stage, "operation {operation}");
                    assert_eq!(kind, ErrorKind::TransportFailure);
                }
                other => panic!("Expected failed for {operation}, got {other:?}"),
            }
            let ops = provider.operations();
            assert!(!ops.contains(&"create_transfer"), "operation {operation}");
            assert!(!ops.contains(&"cancel_transfer"), "operation {operation}");
        }
    }

    #[tokio::test]
    async fn rejected_create_transfer_leaves_old_transfer_untouched() {
        let provider = Arc::new(
            rebookable().failing("create_transfer", status_failure("create_transfer", 422)),
        );
        let outcome = service(&provider, Decimal::ZERO).run().await;

        match outcome {
            Outcome::Failed { stage, kind, cause } => {
                assert_eq!(stage, Stage::CreateTransfer);
                assert_eq!(kind, ErrorKind::UnexpectedStatus);
                assert!(cause.contains("422"));
            }
            other => panic!("Expected failed, got {other:?}"),
        }
        assert!(!provider.operations().contains(&"cancel_transfer"));
    }

    #[tokio::test]
    async fn malformed_live_rate_is_decode_failure() {
        let provider =
            Arc::new(rebookable().failing("get_live_rate", decode_failure("get_live_rate")));
        let outcome = service(&provider, Decimal::ZERO).run().await;

        assert!(matches!(
            outcome,
            Outcome::Failed {
                stage: Stage::FetchLiveRate,
                kind: ErrorKind::DecodeFailure,
                ..
            }
        ));
    }

    // ---------------------------------------------------------------------
    // Post-create cancellation
    // ---------------------------------------------------------------------

    #[tokio::test]
    async fn failed_cancel_still_reports_rebooked() {
        let provider = Arc::new(
            rebookable().failing("cancel_transfer", status_failure("cancel_transfer", 409)),
        );
        let outcome = service(&provider, Decimal::ZERO).run().await;

        match &outcome {
            Outcome::Rebooked {
                new_transfer_id,
                cancellation_failure: Some(failure),
                ..
            } => {
                assert_eq!(new_transfer_id.as_str(), "t-2");
                assert_eq!(failure.transfer_id.as_str(), "t-1");
                assert_eq!(failure.kind, ErrorKind::UnexpectedStatus);
            }
            other => panic!("Expected rebooked with cancellation failure, got {other:?}"),
        }
        assert!(outcome.is_success());
    }

    // ---------------------------------------------------------------------
    // Source amount and request contents
    // ---------------------------------------------------------------------

    #[tokio::test]
    async fn new_transfer_reuses_account_and_details() {
        let provider = Arc::new(rebookable());
        service(&provider, Decimal::ZERO).run().await;

        let request = provider
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ProviderCall::CreateTransfer(request) => Some(request),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.target_account.as_str(), "7993919");
        assert_eq!(request.quote_id.as_str(), "q-new");
        assert_eq!(request.details.reference.as_deref(), Some("rent"));
        assert_eq!(request.idempotency_token.get_version_num(), 4);
    }

    #[tokio::test]
    async fn quote_uses_booked_amount_and_profile() {
        let provider = Arc::new(rebookable());
        service(&provider, Decimal::ZERO).run().await;

        let request = provider
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ProviderCall::CreateQuote(request) => Some(request),
                _ => None,
            })
            .unwrap();
        assert_eq!(request.source_amount, dec!(50000));
        assert_eq!(request.profile.as_str(), "1200");
        assert_eq!(request.source.as_str(), "INR");
        assert_eq!(request.target.as_str(), "EUR");
    }

    #[tokio::test]
    async fn transfer_without_quote_uses_configured_amount() {
        let provider = Arc::new(
            rebookable().with_transfers(vec![legacy_transfer("t-1", dec!(0.0120))]),
        );
        let mut settings = settings(Decimal::ZERO);
        settings.fallback_source_amount = Some(dec!(1234.5));
        let outcome = RebookingService::new(provider.clone(), settings).run().await;

        match outcome {
            Outcome::Rebooked { source_amount, .. } => assert_eq!(source_amount, dec!(1234.5)),
            other => panic!("Expected rebooked, got {other:?}"),
        }
        assert!(!provider.operations().contains(&"get_quote_detail"));
    }

    #[tokio::test]
    async fn transfer_amount_wins_over_configured_amount() {
        let mut legacy = legacy_transfer("t-1", dec!(0.0120));
        legacy.source_amount = Some(dec!(777));
        let provider = Arc::new(rebookable().with_transfers(vec![legacy]));
        let mut settings = settings(Decimal::ZERO);
        settings.fallback_source_amount = Some(dec!(1234.5));
        let outcome = RebookingService::new(provider, settings).run().await;

        assert!(matches!(
            outcome,
            Outcome::Rebooked { source_amount, .. } if source_amount == dec!(777)
        ));
    }

    #[tokio::test]
    async fn missing_amount_fails_at_fetch_detail() {
        let provider = Arc::new(
            rebookable().with_transfers(vec![legacy_transfer("t-1", dec!(0.0120))]),
        );
        let outcome = service(&provider, Decimal::ZERO).run().await;

        assert!(matches!(
            outcome,
            Outcome::Failed {
                stage: Stage::FetchDetail,
                kind: ErrorKind::ConfigInvalid,
                ..
            }
        ));
        assert_eq!(provider.mutating_calls(), 0);
    }

    // ---------------------------------------------------------------------
    // Structured logs
    // ---------------------------------------------------------------------

    #[tokio::test]
    async fn stage_logs_carry_their_stage() {
        let (logs, _guard) = crate::testkit::logs::capture();
        let provider = Arc::new(rebookable());
        let outcome = service(&provider, Decimal::ZERO).run().await;
        assert_eq!(outcome.label(), "rebooked");

        for (message, stage) in [
            ("Selected transfer", "stage=SELECT"),
            ("Compared rates", "stage=COMPARE"),
            ("Generated quote", "stage=GENERATE_QUOTE"),
            ("Replacement transfer created", "stage=CREATE_TRANSFER"),
        ] {
            let line = logs.line_containing(message).unwrap_or_default();
            assert!(line.contains(stage), "{message:?} logged as {line:?}");
        }
    }
}
