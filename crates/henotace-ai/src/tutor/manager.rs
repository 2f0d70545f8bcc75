//! Tutor struct, configuration setters and history compression.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::storage::{Chat, SessionSubject, StorageConnector, TutorRecord};
use crate::{ChatMessage, Result, TutorApi, Verbosity};

use super::compression;
use super::types::CompressionSettings;

/// A tutoring session for one student on one subject.
pub struct Tutor {
    pub(super) api: Arc<dyn TutorApi>,
    pub(super) storage: Arc<dyn StorageConnector>,
    pub(super) student_id: String,
    pub(super) record: TutorRecord,
    /// Free-form instructions describing how the tutor should behave.
    pub(super) persona: Option<String>,
    /// Context notes sent with every message.
    pub(super) context: Vec<String>,
    pub(super) user_profile: Map<String, Value>,
    pub(super) grade_level: Option<String>,
    pub(super) language: Option<String>,
    /// Pinned verbosity; detected from each message when unset.
    pub(super) verbosity: Option<Verbosity>,
    pub(super) compression: CompressionSettings,
    pub(super) summary: String,
    /// Chats before this index are represented by `summary`.
    pub(super) compressed_upto: usize,
    pub(super) sends_since_checkpoint: usize,
}

impl Tutor {
    pub(crate) fn new(
        api: Arc<dyn TutorApi>,
        storage: Arc<dyn StorageConnector>,
        student_id: impl Into<String>,
        record: TutorRecord,
        compression: CompressionSettings,
    ) -> Self {
        Self {
            api,
            storage,
            student_id: student_id.into(),
            record,
            persona: None,
            context: Vec::new(),
            user_profile: Map::new(),
            grade_level: None,
            language: None,
            verbosity: None,
            compression,
            summary: String::new(),
            compressed_upto: 0,
            sends_since_checkpoint: 0,
        }
    }

    pub(crate) fn with_grade_level(mut self, grade_level: Option<String>) -> Self {
        self.grade_level = grade_level;
        self
    }

    pub(crate) fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn tutor_id(&self) -> &str {
        &self.record.id
    }

    /// `(student_id, tutor_id)`.
    pub fn ids(&self) -> (&str, &str) {
        (&self.student_id, &self.record.id)
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn subject(&self) -> Option<&SessionSubject> {
        self.record.subject.as_ref()
    }

    pub fn record(&self) -> &TutorRecord {
        &self.record
    }

    pub fn persona(&self) -> Option<&str> {
        self.persona.as_deref()
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn compression(&self) -> CompressionSettings {
        self.compression
    }

    /// Rolling summary of compressed turns. Empty until the first fold.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn set_persona(&mut self, persona: impl Into<String>) {
        let persona = persona.into();
        self.persona = if persona.trim().is_empty() {
            None
        } else {
            Some(persona)
        };
    }

    pub fn set_context(&mut self, context: Vec<String>) {
        self.context = context
            .into_iter()
            .filter(|note| !note.trim().is_empty())
            .collect();
    }

    pub fn set_user_profile(&mut self, profile: Map<String, Value>) {
        self.user_profile = profile;
    }

    pub fn set_compression(&mut self, settings: CompressionSettings) -> Result<()> {
        settings.validate()?;
        self.compression = settings;
        Ok(())
    }

    pub fn set_verbosity(&mut self, verbosity: Option<Verbosity>) {
        self.verbosity = verbosity;
    }

    /// All stored chats in order. Compression never trims this.
    pub fn history(&self) -> Result<Vec<Chat>> {
        self.storage.list_chats(&self.student_id, &self.record.id)
    }

    /// Fold turns older than the compression window into the summary.
    ///
    /// Returns `true` when anything was folded.
    pub fn compress(&mut self) -> Result<bool> {
        let chats = self.history()?;
        self.sends_since_checkpoint = 0;

        let Some(folded) = compression::fold(
            &chats,
            self.compressed_upto,
            &self.summary,
            &self.compression,
        ) else {
            debug!(tutor = %self.record.id, "nothing to compress");
            return Ok(false);
        };

        info!(
            tutor = %self.record.id,
            folded = folded.cursor - self.compressed_upto,
            summary_chars = folded.summary.chars().count(),
            "compressed tutor history"
        );
        self.compressed_upto = folded.cursor;
        self.summary = folded.summary;
        Ok(true)
    }

    /// History forwarded on the next request.
    pub(super) fn request_history(&self, chats: &[Chat]) -> Vec<ChatMessage> {
        compression::request_history(chats, self.compressed_upto, &self.summary)
    }

    /// Context notes and the per-call context joined into one block.
    pub(super) fn context_block(&self, extra: Option<&str>) -> Option<String> {
        let mut parts: Vec<&str> = self.context.iter().map(String::as_str).collect();
        if let Some(extra) = extra.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(extra);
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}
