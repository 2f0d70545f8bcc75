//! `Henotace`: the SDK entry point.
//!
//! Bundles an API backend and a storage connector, forwards the stateless
//! calls, and creates tutors that share both.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use henotace_common::new_id;
use henotace_config::TutorDefaults;

use crate::storage::{Chat, InMemoryConnector, StorageConnector, TutorRecord};
use crate::tutor::{CompressionSettings, Tutor, TutorOptions};
use crate::{
    ApiStatus, ChatCompletion, ChatRequest, Classwork, ClassworkRequest, ClientConfig,
    HenotaceClient, HenotaceError, Result, TutorApi,
};

const DEFAULT_TUTOR_NAME: &str = "Tutor";

pub struct Henotace {
    api: Arc<dyn TutorApi>,
    storage: Arc<dyn StorageConnector>,
    tutor_defaults: TutorDefaults,
}

impl Henotace {
    /// HTTP backend with a fresh in-memory store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = HenotaceClient::new(config)?;
        Ok(Self::from_parts(
            Arc::new(client),
            Arc::new(InMemoryConnector::new()),
        ))
    }

    pub fn from_parts(api: Arc<dyn TutorApi>, storage: Arc<dyn StorageConnector>) -> Self {
        Self {
            api,
            storage,
            tutor_defaults: TutorDefaults::default(),
        }
    }

    /// Language, grade level and compression applied to new tutors.
    ///
    /// Fails with `InvalidInput` when any compression bound is zero.
    pub fn with_tutor_defaults(mut self, defaults: TutorDefaults) -> Result<Self> {
        CompressionSettings::from(&defaults.compression).validate()?;
        self.tutor_defaults = defaults;
        Ok(self)
    }

    pub fn api(&self) -> &Arc<dyn TutorApi> {
        &self.api
    }

    pub fn storage(&self) -> &Arc<dyn StorageConnector> {
        &self.storage
    }

    pub async fn status(&self) -> Result<ApiStatus> {
        self.api.status().await
    }

    /// `true` only when the status call succeeds and reports success.
    pub async fn status_ok(&self) -> bool {
        match self.api.status().await {
            Ok(status) => status.success,
            Err(err) => {
                warn!(error = %err, "status check failed");
                false
            }
        }
    }

    pub async fn complete_chat(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        self.api.complete_chat(request).await
    }

    pub async fn generate_classwork(&self, request: &ClassworkRequest) -> Result<Classwork> {
        self.api.generate_classwork(request).await
    }

    pub fn list_students(&self) -> Result<Vec<String>> {
        self.storage.list_students()
    }

    pub fn list_tutors(&self, student_id: &str) -> Result<Vec<TutorRecord>> {
        self.storage.list_tutors(student_id)
    }

    pub fn list_chats(&self, student_id: &str, tutor_id: &str) -> Result<Vec<Chat>> {
        self.storage.list_chats(student_id, tutor_id)
    }

    /// Register a tutor for a student and return a session bound to it.
    pub fn create_tutor(&self, options: TutorOptions) -> Result<Tutor> {
        let student_id = options.student_id.trim();
        if student_id.is_empty() {
            return Err(HenotaceError::InvalidInput("student_id must not be empty".into()));
        }

        let record = TutorRecord {
            id: options
                .tutor_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(new_id),
            name: options
                .tutor_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TUTOR_NAME.to_string()),
            subject: options.subject,
            created_at: Utc::now(),
        };
        self.storage.upsert_tutor(student_id, record.clone())?;

        info!(
            student = student_id,
            tutor = %record.id,
            subject = record.subject.as_ref().map(|s| s.name.as_str()).unwrap_or(""),
            "created tutor"
        );

        Ok(self.session(
            student_id,
            record,
            options.grade_level,
            options.language,
        ))
    }

    /// Reattach to a tutor that already exists in storage.
    ///
    /// The stored history is kept; the compression summary starts empty.
    pub fn resume_tutor(&self, student_id: &str, tutor_id: &str) -> Result<Tutor> {
        let record = self
            .storage
            .list_tutors(student_id)?
            .into_iter()
            .find(|t| t.id == tutor_id)
            .ok_or_else(|| {
                HenotaceError::Storage(format!(
                    "no tutor {tutor_id:?} for student {student_id:?}"
                ))
            })?;
        Ok(self.session(student_id, record, None, None))
    }

    fn session(
        &self,
        student_id: &str,
        record: TutorRecord,
        grade_level: Option<String>,
        language: Option<String>,
    ) -> Tutor {
        let defaults = &self.tutor_defaults;
        Tutor::new(
            Arc::clone(&self.api),
            Arc::clone(&self.storage),
            student_id,
            record,
            CompressionSettings::from(&defaults.compression),
        )
        .with_grade_level(grade_level.or_else(|| defaults.grade_level.clone()))
        .with_language(language.or_else(|| Some(defaults.language.clone())))
    }
}
