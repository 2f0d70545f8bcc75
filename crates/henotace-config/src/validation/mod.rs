//! Full configuration validation.
//!
//! Each section is checked independently and all problems are collected
//! into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::HenotaceConfig;
use helpers::{validate_range, validate_url};
use henotace_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HenotaceConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_compression(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &HenotaceConfig) {
    let api = &config.api;
    validate_url(errors, "api.base_url", &api.base_url);
    validate_range(errors, "api.timeout_secs", api.timeout_secs, 1, 600);
    validate_range(
        errors,
        "api.connect_timeout_secs",
        api.connect_timeout_secs,
        1,
        120,
    );
    validate_range(errors, "api.retries", u64::from(api.retries), 0, 10);
    validate_range(errors, "api.retry_delay_ms", api.retry_delay_ms, 0, 60_000);
}

fn validate_compression(errors: &mut Vec<String>, config: &HenotaceConfig) {
    let c = &config.tutor.compression;
    validate_range(errors, "tutor.compression.max_turns", c.max_turns as u64, 1, 100);
    validate_range(
        errors,
        "tutor.compression.max_summary_chars",
        c.max_summary_chars as u64,
        100,
        20_000,
    );
    validate_range(
        errors,
        "tutor.compression.checkpoint_every",
        c.checkpoint_every as u64,
        1,
        100,
    );
}
