//! Core TOML config loading: read from path or platform default.

use crate::schema::HenotaceConfig;
use crate::validation;
use henotace_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Validation problems are logged
/// here and surfaced as errors by [`crate::load_config`].
pub fn load_from_path(path: &Path) -> Result<HenotaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: HenotaceConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/henotace/config.toml`
///
/// A missing file is seeded from the template and defaults are returned.
pub fn load_default() -> Result<HenotaceConfig, ConfigError> {
    let path = default_config_path()?;

    if create_default_config(&path)? {
        return Ok(HenotaceConfig::default());
    }

    load_from_path(&path)
}
