//! HTTP client struct, header construction and the retrying request loop.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use henotace_common::{new_request_id, ConfigError};

use crate::{HenotaceError, Result};

use super::config::ClientConfig;
use super::response::{classify_status, transport_error, unwrap_envelope};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Henotace API client.
pub struct HenotaceClient {
    pub(crate) config: ClientConfig,
    pub(crate) http: reqwest::Client,
}

impl HenotaceClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredentials("API key must not be empty".into()).into());
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .default_headers(default_headers(&config.api_key)?)
            .build()
            .map_err(|e| HenotaceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request once and return the unwrapped JSON payload.
    async fn send_once(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let request_id = new_request_id();
        debug!(%method, path, request_id = %request_id, "Henotace API request");

        let mut request = self
            .http
            .request(method, self.endpoint(path))
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &text));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| HenotaceError::Parse(format!("invalid JSON from {path}: {e}")))?;

        unwrap_envelope(status.as_u16(), json)
    }

    /// Send with retries on transient failures.
    ///
    /// Attempt `n` (1-based) waits `n * retry_delay` before retrying.
    pub(crate) async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut attempt = 0;
        loop {
            match self.send_once(method.clone(), path, body).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    warn!(path, attempt, error = %err, "retrying Henotace API request");
                    tokio::time::sleep(self.config.retry_delay * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn default_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
        .map_err(|_| HenotaceError::InvalidInput("API key contains invalid header characters".into()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("henotace-rs/", env!("CARGO_PKG_VERSION"))),
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let err = HenotaceClient::new(ClientConfig::new("  ")).err().unwrap();
        assert!(matches!(
            err,
            HenotaceError::Config(ConfigError::MissingCredentials(_))
        ));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let err = HenotaceClient::new(ClientConfig::new("abc\ndef")).err().unwrap();
        assert!(matches!(err, HenotaceError::InvalidInput(_)));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client =
            HenotaceClient::new(ClientConfig::new("key").with_base_url("http://localhost:8000/"))
                .unwrap();
        assert_eq!(
            client.endpoint("/api/external/status/"),
            "http://localhost:8000/api/external/status/"
        );
    }

    #[test]
    fn default_headers_carry_bearer_token() {
        let headers = default_headers("henotace_dev_abc").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer henotace_dev_abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[ACCEPT], "application/json");
    }
}
