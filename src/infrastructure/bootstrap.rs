//! Composition root: wires the provider client into the workflow.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::wise::WiseClient;
use crate::application::rebooking::{RebookingService, RebookingSettings};
use crate::application::scheduler::Scheduler;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::TransferProvider;

/// Build the rebooking service backed by the Wise REST client.
///
/// # Errors
///
/// Returns an error if the provider client cannot be configured.
pub fn build_service(config: &Config) -> Result<RebookingService> {
    let provider: Arc<dyn TransferProvider> = Arc::new(WiseClient::from_config(&config.provider)?);
    info!(
        provider = provider.provider_name(),
        profile_id = %config.provider.profile_id,
        margin = %config.strategy.margin,
        "Rebooking service ready"
    );
    Ok(RebookingService::new(
        provider,
        RebookingSettings::from_config(config),
    ))
}

/// Build the periodic scheduler around a freshly built service.
///
/// # Errors
///
/// Same as [`build_service`].
pub fn build_scheduler(config: &Config) -> Result<Scheduler> {
    let service = Arc::new(build_service(config)?);
    Ok(Scheduler::new(
        service,
        Duration::from_secs(config.schedule.interval_secs),
    ))
}
