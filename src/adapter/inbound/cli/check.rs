//! Handler for the `check` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file without contacting the provider.
pub fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    output::section("Configuration Check");
    output::field("Config", config_path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("API", &config.provider.api_url);
    output::field("Profile", &config.provider.profile_id);
    output::field("Status filter", &config.provider.status_filter);
    output::field("List limit", config.provider.list_limit);
    output::field("Margin", config.strategy.margin);
    match config.strategy.source_amount {
        Some(amount) => output::field("Source amount", amount),
        None => output::field("Source amount", output::muted("from booked quote")),
    }
    output::field("Interval", format!("{}s", config.schedule.interval_secs));
    output::success("API token detected");

    Ok(())
}
