//! Tutor creation options and compression settings.

use henotace_config::CompressionConfig;

use crate::storage::SessionSubject;
use crate::{HenotaceError, Result};

/// Bounds on how much history is forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    /// Most recent turns sent verbatim.
    pub max_turns: usize,
    /// Upper bound on the rolling summary, in characters.
    pub max_summary_chars: usize,
    /// Compress automatically after this many sends.
    pub checkpoint_every: usize,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_turns: 10,
            max_summary_chars: 1200,
            checkpoint_every: 5,
        }
    }
}

impl CompressionSettings {
    pub fn new(max_turns: usize, max_summary_chars: usize, checkpoint_every: usize) -> Self {
        Self {
            max_turns,
            max_summary_chars,
            checkpoint_every,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 || self.max_summary_chars == 0 || self.checkpoint_every == 0 {
            return Err(HenotaceError::InvalidInput(format!(
                "compression settings must be positive: {self:?}"
            )));
        }
        Ok(())
    }
}

impl From<&CompressionConfig> for CompressionSettings {
    fn from(config: &CompressionConfig) -> Self {
        Self::new(
            config.max_turns,
            config.max_summary_chars,
            config.checkpoint_every,
        )
    }
}

/// Parameters for `Henotace::create_tutor`.
#[derive(Debug, Clone, Default)]
pub struct TutorOptions {
    pub student_id: String,
    pub tutor_name: Option<String>,
    /// Reuse an id instead of generating one.
    pub tutor_id: Option<String>,
    pub subject: Option<SessionSubject>,
    pub grade_level: Option<String>,
    pub language: Option<String>,
}

impl TutorOptions {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tutor_name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.tutor_id = Some(id.into());
        self
    }

    pub fn with_subject(mut self, subject: SessionSubject) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_grade_level(mut self, grade_level: impl Into<String>) -> Self {
        self.grade_level = Some(grade_level.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
