//! Scripted `TutorApi` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    ApiStatus, ChatCompletion, ChatRequest, Classwork, ClassworkQuestion, ClassworkRequest,
    HenotaceError, QuestionType, Result, StatusData, TutorApi,
};

/// Replays queued chat replies and records every request it receives.
///
/// Classwork always returns exactly the requested number of questions.
/// When the reply queue is empty, chat completion echoes the input.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    replies: Mutex<VecDeque<Result<String>>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub classwork_requests: Mutex<Vec<ClassworkRequest>>,
    pub status_error: Option<u16>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_status(status: u16) -> Self {
        Self {
            status_error: Some(status),
            ..Self::default()
        }
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, error: HenotaceError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn last_chat_request(&self) -> ChatRequest {
        self.chat_requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no chat request recorded")
    }

    pub fn chat_count(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
    }
}

pub(crate) fn question(n: u32) -> ClassworkQuestion {
    ClassworkQuestion {
        question: format!("Question {n}"),
        question_type: QuestionType::ShortAnswer,
        options: Vec::new(),
        correct_answer: None,
        explanation: None,
        points: None,
    }
}

#[async_trait]
impl TutorApi for ScriptedApi {
    async fn status(&self) -> Result<ApiStatus> {
        match self.status_error {
            Some(401) => Err(HenotaceError::Authentication {
                status: 401,
                message: "Invalid API key".into(),
            }),
            Some(status) => Err(HenotaceError::Api {
                status,
                message: "unavailable".into(),
            }),
            None => Ok(ApiStatus {
                success: true,
                data: StatusData {
                    status: "ok".into(),
                    message: "API is running".into(),
                },
            }),
        }
    }

    async fn complete_chat(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        self.chat_requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(ChatCompletion { ai_response: reply }),
            Some(Err(err)) => Err(err),
            None => Ok(ChatCompletion {
                ai_response: format!("echo: {}", request.input),
            }),
        }
    }

    async fn generate_classwork(&self, request: &ClassworkRequest) -> Result<Classwork> {
        request.validate()?;
        self.classwork_requests.lock().unwrap().push(request.clone());
        let questions = (1..=request.question_count).map(question).collect();
        Classwork::from_questions(request, questions)
    }
}
