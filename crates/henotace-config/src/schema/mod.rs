//! Configuration schema types for the Henotace client.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod logging;
mod tutor;

pub use api::*;
pub use logging::*;
pub use tutor::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Holds no API key; the key comes from the environment or the
/// command line.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HenotaceConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub tutor: TutorDefaults,
}
