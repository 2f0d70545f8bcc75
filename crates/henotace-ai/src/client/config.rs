//! Henotace API client configuration.

use std::fmt;
use std::time::Duration;

use henotace_common::ConfigError;
use henotace_config::schema::DEFAULT_BASE_URL;
use henotace_config::HenotaceConfig;

/// Henotace API client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after a retryable failure.
    pub retries: u32,
    pub retry_delay: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }

    /// Create config from the `HENOTACE_API_KEY` environment variable
    /// with default settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(henotace_config::api_key_from_env()?))
    }

    /// Build from a loaded config file plus a key obtained elsewhere.
    pub fn from_config(config: &HenotaceConfig, api_key: impl Into<String>) -> Self {
        let api = &config.api;
        Self {
            api_key: api_key.into(),
            base_url: api.base_url.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
            connect_timeout: Duration::from_secs(api.connect_timeout_secs),
            retries: api.retries,
            retry_delay: Duration::from_millis(api.retry_delay_ms),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}
