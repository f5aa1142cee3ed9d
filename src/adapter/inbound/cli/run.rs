//! Handler for the `run` command.

use std::path::Path;

use tracing::info;

use crate::adapter::inbound::cli::{load_config, output};
use crate::application::report::report;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute the run command: tick until Ctrl-C.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let scheduler = bootstrap::build_scheduler(&config)?;

    if !output::is_quiet() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Config", config_path.display());
        output::field("Profile", &config.provider.profile_id);
        output::field("Margin", config.strategy.margin);
        output::field("Interval", format!("{}s", config.schedule.interval_secs));
        output::note("Press Ctrl-C to stop");
    }

    let shutdown = async {
        // An error here means no signal handler could be installed; treat it
        // as an immediate stop.
        let _ = tokio::signal::ctrl_c().await;
    };
    let json = output::is_json();
    scheduler
        .run_until(shutdown, move |outcome| {
            report(outcome);
            if json {
                output::outcome(outcome);
            }
        })
        .await;

    info!("rebook stopped");
    Ok(())
}
