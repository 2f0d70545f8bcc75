//! Storage connector: where students, tutors and chat logs live.
//!
//! Associates a student id with its tutors, and a (student, tutor) pair
//! with an ordered chat log. Only the in-memory connector ships here;
//! the trait exists so callers can plug in their own persistence.

mod memory;

pub use memory::InMemoryConnector;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ChatMessage, Result, Role};

/// A stored chat entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub content: String,
    /// `true` for tutor replies, `false` for student input.
    pub is_reply: bool,
    pub timestamp: DateTime<Utc>,
}

impl Chat {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_reply: false,
            timestamp: Utc::now(),
        }
    }

    pub fn reply(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_reply: true,
            timestamp: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        if self.is_reply {
            Role::Assistant
        } else {
            Role::User
        }
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role(),
            content: self.content.clone(),
        }
    }
}

/// Subject a tutor is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSubject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl SessionSubject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topic: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRecord {
    pub id: String,
    pub name: String,
    pub subject: Option<SessionSubject>,
    pub created_at: DateTime<Utc>,
}

/// Persistence backend for tutors and their chat logs.
///
/// Chat logs are append-ordered: `list_chats` returns entries in the
/// order they were appended.
pub trait StorageConnector: Send + Sync {
    /// Student ids that have at least one tutor, sorted.
    fn list_students(&self) -> Result<Vec<String>>;

    /// Insert a tutor record, or replace the one with the same id.
    fn upsert_tutor(&self, student_id: &str, tutor: TutorRecord) -> Result<()>;

    /// Tutors of a student in creation order. Unknown students have none.
    fn list_tutors(&self, student_id: &str) -> Result<Vec<TutorRecord>>;

    /// Remove a tutor and its chat log.
    fn delete_tutor(&self, student_id: &str, tutor_id: &str) -> Result<()>;

    fn list_chats(&self, student_id: &str, tutor_id: &str) -> Result<Vec<Chat>>;

    /// Append to a tutor's chat log. Fails if the tutor does not exist.
    fn append_chat(&self, student_id: &str, tutor_id: &str, chat: Chat) -> Result<()>;

    /// Append several chats in one step: either all are stored or none.
    fn append_chats(&self, student_id: &str, tutor_id: &str, chats: Vec<Chat>) -> Result<()>;

    /// Overwrite a tutor's chat log. Fails if the tutor does not exist.
    fn replace_chats(&self, student_id: &str, tutor_id: &str, chats: Vec<Chat>) -> Result<()>;
}
