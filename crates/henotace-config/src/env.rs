//! Environment variable overrides.

use henotace_common::ConfigError;
use tracing::warn;

use crate::schema::HenotaceConfig;

pub const API_KEY_ENV: &str = "HENOTACE_API_KEY";
pub const BASE_URL_ENV: &str = "HENOTACE_BASE_URL";
pub const TIMEOUT_ENV: &str = "HENOTACE_TIMEOUT";

/// Read the API key from `HENOTACE_API_KEY`.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    api_key_from(|k| std::env::var(k).ok())
}

/// Apply `HENOTACE_BASE_URL` / `HENOTACE_TIMEOUT` on top of a loaded config.
pub fn apply_env_overrides(config: &mut HenotaceConfig) {
    apply_overrides_from(config, |k| std::env::var(k).ok());
}

pub(crate) fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    match lookup(API_KEY_ENV) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingCredentials(format!(
            "{API_KEY_ENV} is not set"
        ))),
    }
}

pub(crate) fn apply_overrides_from(
    config: &mut HenotaceConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().trim_end_matches('/').to_string();
    }

    if let Some(raw) = lookup(TIMEOUT_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.api.timeout_secs = secs,
            Err(_) => warn!("ignoring {TIMEOUT_ENV}={raw:?}: not a whole number of seconds"),
        }
    }
}
