//! Client SDK for the Henotace tutoring API.
//!
//! Provides:
//! - An authenticated HTTP client for the status, chat completion and
//!   classwork generation endpoints
//! - Tutor sessions that accumulate conversation history client-side
//!   and forward it on every call, with rolling history compression
//! - A pluggable storage connector (in-memory by default)
//! - Keyword-based response verbosity detection

pub mod classwork;
pub mod client;
pub mod sdk;
pub mod storage;
pub mod tutor;
pub mod verbosity;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use classwork::{
    Classwork, ClassworkQuestion, ClassworkRequest, Difficulty, QuestionType, MAX_QUESTION_COUNT,
};
pub use client::{ClientConfig, HenotaceClient};
pub use henotace_common::{HenotaceError, Result};
pub use sdk::Henotace;
pub use storage::{Chat, InMemoryConnector, SessionSubject, StorageConnector, TutorRecord};
pub use tutor::{CompressionSettings, Tutor, TutorOptions};
pub use verbosity::Verbosity;

/// The remote operations a tutor needs. `HenotaceClient` is the HTTP
/// implementation; tests substitute scripted ones.
#[async_trait]
pub trait TutorApi: Send + Sync {
    async fn status(&self) -> Result<ApiStatus>;

    async fn complete_chat(&self, request: &ChatRequest) -> Result<ChatCompletion>;

    async fn generate_classwork(&self, request: &ClassworkRequest) -> Result<Classwork>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One history entry as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of a chat completion request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatRequest {
    pub history: Vec<ChatMessage>,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<Verbosity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ChatRequest {
    pub fn new(history: Vec<ChatMessage>, input: impl Into<String>) -> Self {
        Self {
            history,
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    #[serde(alias = "response", alias = "reply")]
    pub ai_response: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Result of the liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiStatus {
    pub success: bool,
    pub data: StatusData,
}
