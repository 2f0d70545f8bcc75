use serde::{Deserialize, Serialize};

/// Default production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.henotace.ai";

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme + host (+ optional path prefix), no trailing slash required.
    pub base_url: String,
    /// Whole-request timeout in seconds (valid range: 1-600).
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u64,
    /// Extra attempts after a retryable failure (valid range: 0-10).
    pub retries: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_delay_ms`.
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            retries: 2,
            retry_delay_ms: 500,
        }
    }
}
