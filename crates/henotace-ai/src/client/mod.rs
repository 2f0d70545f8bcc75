//! Henotace REST API client.
//!
//! Implements the `TutorApi` trait over HTTPS with bearer-token
//! authentication, response envelope unwrapping, error classification
//! and bounded retries.

mod api;
mod client;
mod config;
mod response;

pub use client::HenotaceClient;
pub use config::ClientConfig;
pub use response::classify_status;

pub(crate) const STATUS_PATH: &str = "/api/external/status/";
pub(crate) const CHAT_COMPLETION_PATH: &str = "/api/external/working/chat/completion/";
pub(crate) const CLASSWORK_PATH: &str = "/api/external/working/classwork/generate/";
