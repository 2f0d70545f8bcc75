//! Classwork: structured practice questions generated from a conversation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ChatMessage, HenotaceError};

/// Upper bound on questions per request.
pub const MAX_QUESTION_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = HenotaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(HenotaceError::InvalidInput(format!(
                "unsupported difficulty {other:?} (expected easy, medium or hard)"
            ))),
        }
    }
}

/// Question type tag. Tags the client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    TrueFalse,
    Essay,
    #[default]
    Unspecified,
    Other(String),
}

impl From<String> for QuestionType {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "multiple_choice" | "mcq" => Self::MultipleChoice,
            "short_answer" => Self::ShortAnswer,
            "true_false" => Self::TrueFalse,
            "essay" => Self::Essay,
            "" => Self::Unspecified,
            _ => Self::Other(tag),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::MultipleChoice => "multiple_choice".into(),
            QuestionType::ShortAnswer => "short_answer".into(),
            QuestionType::TrueFalse => "true_false".into(),
            QuestionType::Essay => "essay".into(),
            QuestionType::Unspecified => String::new(),
            QuestionType::Other(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassworkQuestion {
    #[serde(alias = "text")]
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default, alias = "choices")]
    pub options: Vec<String>,
    #[serde(
        default,
        alias = "answer",
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl ClassworkQuestion {
    pub fn is_multiple_choice(&self) -> bool {
        match self.question_type {
            QuestionType::MultipleChoice => true,
            QuestionType::Unspecified => !self.options.is_empty(),
            _ => false,
        }
    }

    /// Index into `options` of the correct answer.
    ///
    /// The server marks answers either by repeating the option text, by a
    /// letter (`"B"`), or by a zero-based index.
    pub fn correct_option_index(&self) -> Option<usize> {
        let answer = self.correct_answer.as_deref()?.trim();
        if answer.is_empty() || self.options.is_empty() {
            return None;
        }

        if let Some(i) = self
            .options
            .iter()
            .position(|o| o.trim().eq_ignore_ascii_case(answer))
        {
            return Some(i);
        }

        let mut chars = answer.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                let i = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                return (i < self.options.len()).then_some(i);
            }
        }

        answer
            .parse::<usize>()
            .ok()
            .filter(|i| *i < self.options.len())
    }
}

/// Accept `"B"`, `2` or `true` for the correct answer field.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Parameters of a classwork generation call.
#[derive(Debug, Clone, Serialize)]
pub struct ClassworkRequest {
    pub history: Vec<ChatMessage>,
    pub subject: String,
    pub topic: String,
    pub question_count: u32,
    pub difficulty: Difficulty,
}

impl ClassworkRequest {
    pub fn new(
        history: Vec<ChatMessage>,
        subject: impl Into<String>,
        topic: impl Into<String>,
        question_count: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            history,
            subject: subject.into(),
            topic: topic.into(),
            question_count,
            difficulty,
        }
    }

    pub fn validate(&self) -> Result<(), HenotaceError> {
        if self.question_count == 0 || self.question_count > MAX_QUESTION_COUNT {
            return Err(HenotaceError::InvalidInput(format!(
                "question_count must be between 1 and {MAX_QUESTION_COUNT}, got {}",
                self.question_count
            )));
        }
        if self.subject.trim().is_empty() {
            return Err(HenotaceError::InvalidInput("subject must not be empty".into()));
        }
        if self.topic.trim().is_empty() {
            return Err(HenotaceError::InvalidInput("topic must not be empty".into()));
        }
        Ok(())
    }
}

/// A generated set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classwork {
    pub questions: Vec<ClassworkQuestion>,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl Classwork {
    /// Wrap server questions, failing unless exactly the requested number came back.
    pub fn from_questions(
        request: &ClassworkRequest,
        questions: Vec<ClassworkQuestion>,
    ) -> Result<Self, HenotaceError> {
        if questions.len() != request.question_count as usize {
            return Err(HenotaceError::QuestionCountMismatch {
                requested: request.question_count,
                received: questions.len(),
            });
        }
        Ok(Self {
            questions,
            subject: request.subject.clone(),
            topic: request.topic.clone(),
            difficulty: request.difficulty,
        })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(count: u32) -> ClassworkRequest {
        ClassworkRequest::new(
            vec![ChatMessage::user("I need help with linear equations")],
            "mathematics",
            "linear equations",
            count,
            Difficulty::Medium,
        )
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        let err = "expert".parse::<Difficulty>().unwrap_err();
        assert!(matches!(err, HenotaceError::InvalidInput(_)));
    }

    #[test]
    fn question_count_bounds() {
        assert!(request(1).validate().is_ok());
        assert!(request(MAX_QUESTION_COUNT).validate().is_ok());
        assert!(request(0).validate().is_err());
        assert!(request(MAX_QUESTION_COUNT + 1).validate().is_err());
    }

    #[test]
    fn blank_subject_is_rejected() {
        let mut req = request(3);
        req.subject = "  ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn parses_multiple_choice_question() {
        let q: ClassworkQuestion = serde_json::from_value(json!({
            "question": "Solve 2x + 5 = 13",
            "type": "multiple_choice",
            "options": ["x = 3", "x = 4", "x = 5", "x = 9"],
            "correct_answer": "x = 4",
            "explanation": "Subtract 5, then divide by 2."
        }))
        .unwrap();

        assert!(q.is_multiple_choice());
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_option_index(), Some(1));
    }

    #[test]
    fn accepts_choices_alias_and_letter_answer() {
        let q: ClassworkQuestion = serde_json::from_value(json!({
            "question": "Which is linear?",
            "choices": ["x^2 = 4", "2x + 1 = 5"],
            "answer": "b"
        }))
        .unwrap();

        assert_eq!(q.question_type, QuestionType::Unspecified);
        assert!(q.is_multiple_choice());
        assert_eq!(q.correct_option_index(), Some(1));
    }

    #[test]
    fn numeric_answer_becomes_index() {
        let q: ClassworkQuestion = serde_json::from_value(json!({
            "question": "Pick the solution of x + 1 = 3",
            "type": "mcq",
            "options": ["1", "2", "3"],
            "correct_answer": 1
        }))
        .unwrap();
        // "1" matches the option text first
        assert_eq!(q.correct_answer.as_deref(), Some("1"));
        assert_eq!(q.correct_option_index(), Some(0));
    }

    #[test]
    fn unknown_type_is_preserved() {
        let q: ClassworkQuestion = serde_json::from_value(json!({
            "question": "Fill in the blank: 2 + _ = 5",
            "type": "fill_in_blank"
        }))
        .unwrap();
        assert_eq!(q.question_type, QuestionType::Other("fill_in_blank".into()));
        assert!(!q.is_multiple_choice());
        assert_eq!(q.correct_option_index(), None);

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["type"], "fill_in_blank");
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let questions = vec![
            serde_json::from_value::<ClassworkQuestion>(json!({ "question": "Q1" })).unwrap(),
        ];
        let err = Classwork::from_questions(&request(3), questions).unwrap_err();
        assert!(matches!(
            err,
            HenotaceError::QuestionCountMismatch {
                requested: 3,
                received: 1
            }
        ));
    }

    #[test]
    fn exact_count_is_accepted() {
        let questions: Vec<ClassworkQuestion> = (1..=2)
            .map(|i| serde_json::from_value(json!({ "question": format!("Q{i}") })).unwrap())
            .collect();
        let classwork = Classwork::from_questions(&request(2), questions).unwrap();
        assert_eq!(classwork.len(), 2);
        assert_eq!(classwork.topic, "linear equations");
        assert_eq!(classwork.difficulty, Difficulty::Medium);
    }
}
