//! CLI module graph.

pub mod check;
pub mod command;
pub mod once;
pub mod output;
pub mod paths;
pub mod run;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load configuration and initialize logging from it and the global flags.
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;
    let flags =
        output::OutputConfig::new(output::is_json(), output::is_quiet(), output::verbosity());
    config
        .logging
        .clone()
        .with_json(flags.json)
        .with_level(flags.log_level())
        .init();
    Ok(config)
}
