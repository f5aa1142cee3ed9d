//! Command-line interface definitions.
//!
//! Defines the CLI structure for the rebook application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Rebook a pending currency transfer when the live rate improves
#[derive(Parser, Debug)]
#[command(name = "rebook")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the rebook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the workflow on a fixed schedule (foreground)
    Run(ConfigPathArg),

    /// Run the workflow once and print the outcome
    Once(ConfigPathArg),

    /// Validate the configuration file
    Check(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}
