//! Async tutor methods: send a message, generate classwork.

use tracing::{debug, info, warn};

use crate::storage::Chat;
use crate::{
    ChatRequest, Classwork, ClassworkRequest, Difficulty, HenotaceError, Result, Verbosity,
};

use super::manager::Tutor;

const FALLBACK_SUBJECT: &str = "general";

impl Tutor {
    /// Send a student message and return the tutor's reply.
    ///
    /// The exchange is stored only when the API call succeeds, so each
    /// successful call adds exactly two chats.
    pub async fn send(&mut self, message: &str, context: Option<&str>) -> Result<String> {
        if message.trim().is_empty() {
            return Err(HenotaceError::InvalidInput("message must not be empty".into()));
        }

        let chats = self.history()?;
        let verbosity = self
            .verbosity
            .unwrap_or_else(|| Verbosity::detect(message));

        let mut request = ChatRequest::new(self.request_history(&chats), message)
            .with_verbosity(verbosity);
        if let Some(subject) = self.record.subject.as_ref() {
            request.subject = Some(subject.name.clone());
            request.topic = subject.topic.clone();
        }
        request.persona = self.persona.clone();
        request.context = self.context_block(context);
        if !self.user_profile.is_empty() {
            request.user_profile = Some(self.user_profile.clone());
        }
        request.grade_level = self.grade_level.clone();
        request.language = self.language.clone();

        debug!(
            tutor = %self.record.id,
            history = request.history.len(),
            verbosity = %verbosity,
            "tutor send"
        );

        let completion = self.api.complete_chat(&request).await?;

        self.storage.append_chats(
            &self.student_id,
            &self.record.id,
            vec![
                Chat::user(message),
                Chat::reply(completion.ai_response.clone()),
            ],
        )?;

        // The exchange is stored; a failed checkpoint only delays folding
        self.sends_since_checkpoint += 1;
        if self.sends_since_checkpoint >= self.compression.checkpoint_every {
            if let Err(err) = self.compress() {
                warn!(tutor = %self.record.id, error = %err, "checkpoint compression failed");
            }
        }

        Ok(completion.ai_response)
    }

    /// Generate classwork from this tutor's subject and full history.
    pub async fn generate_classwork(
        &self,
        question_count: u32,
        difficulty: Difficulty,
    ) -> Result<Classwork> {
        let history = self
            .history()?
            .iter()
            .map(Chat::to_message)
            .collect();

        let (subject, topic) = match self.record.subject.as_ref() {
            Some(subject) => (
                subject.name.clone(),
                subject
                    .topic
                    .clone()
                    .unwrap_or_else(|| FALLBACK_SUBJECT.to_string()),
            ),
            None => (FALLBACK_SUBJECT.to_string(), FALLBACK_SUBJECT.to_string()),
        };

        let request = ClassworkRequest::new(history, subject, topic, question_count, difficulty);
        let classwork = self.api.generate_classwork(&request).await?;

        info!(
            tutor = %self.record.id,
            questions = classwork.len(),
            difficulty = %difficulty,
            "generated classwork"
        );
        Ok(classwork)
    }
}
