//! Handler for the `once` command.

use std::path::Path;

use crate::adapter::inbound::cli::{load_config, output};
use crate::application::report::report;
use crate::domain::Outcome;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute one workflow run and print its outcome.
///
/// Returns the outcome so the caller can pick the exit status.
pub async fn execute(config_path: &Path) -> Result<Outcome> {
    let config = load_config(config_path)?;
    let service = bootstrap::build_service(&config)?;

    let outcome = service.run().await;
    report(&outcome);
    output::outcome(&outcome);
    Ok(outcome)
}
