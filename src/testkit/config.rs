//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::settings::{Config, API_TOKEN_ENV};

/// Minimal valid TOML: a profile and nothing else.
pub const MINIMAL_TOML: &str = r#"
[provider]
profile_id = "1200"
"#;

/// Environment lookup that provides only an API token.
pub fn token_only(key: &str) -> Option<String> {
    (key == API_TOKEN_ENV).then(|| "test-token".to_string())
}

/// A valid configuration pointing the provider at `api_url`.
pub fn config_for(api_url: &str) -> Config {
    let toml = format!("[provider]\nprofile_id = \"1200\"\napi_url = \"{api_url}\"\n");
    Config::parse_toml_with_env(&toml, token_only).expect("valid test config")
}
