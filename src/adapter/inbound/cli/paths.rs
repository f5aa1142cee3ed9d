//! Path utilities for rebook.
//!
//! All data lives under `~/.rebook/`:
//! - `~/.rebook/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the rebook home directory (`~/.rebook/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rebook")
}

/// Returns the default config file path (`~/.rebook/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
