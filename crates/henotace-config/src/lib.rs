//! Henotace client configuration.
//!
//! TOML-based configuration for the API client, logging, and tutor
//! defaults. All sections use serde defaults so partial configs work,
//! and a handful of `HENOTACE_*` environment variables override the file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use henotace_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{api_key_from_env, apply_env_overrides, API_KEY_ENV, BASE_URL_ENV, TIMEOUT_ENV};
pub use schema::{
    ApiConfig, CompressionConfig, HenotaceConfig, LogLevel, LoggingConfig, TutorDefaults,
    CONFIG_SCHEMA_VERSION,
};

use henotace_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, apply environment
/// overrides, and validate the result.
pub fn load_config() -> Result<HenotaceConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Same as [`load_config`] but reads an explicit file.
pub fn load_config_from(path: &Path) -> Result<HenotaceConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let mut config = toml_loader::load_from_path(path)?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HenotaceConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
