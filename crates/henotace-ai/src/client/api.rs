//! TutorApi trait implementation for HenotaceClient.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    ApiStatus, ChatCompletion, ChatRequest, Classwork, ClassworkQuestion, ClassworkRequest,
    HenotaceError, Result, StatusData, TutorApi,
};

use super::client::HenotaceClient;
use super::{CHAT_COMPLETION_PATH, CLASSWORK_PATH, STATUS_PATH};

#[derive(Deserialize)]
struct ClassworkPayload {
    #[serde(default)]
    questions: Vec<ClassworkQuestion>,
}

/// Build an `ApiStatus` from an unwrapped status payload.
///
/// A 2xx answer without an explicit flag counts as up.
fn parse_status(payload: Value) -> Result<ApiStatus> {
    let success = payload
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let data: StatusData = serde_json::from_value(payload)
        .map_err(|e| HenotaceError::Parse(format!("invalid status payload: {e}")))?;
    Ok(ApiStatus { success, data })
}

fn parse_completion(payload: Value) -> Result<ChatCompletion> {
    let completion: ChatCompletion = serde_json::from_value(payload)
        .map_err(|e| HenotaceError::Parse(format!("invalid chat completion payload: {e}")))?;
    if completion.ai_response.trim().is_empty() {
        return Err(HenotaceError::Parse("chat completion returned an empty response".into()));
    }
    Ok(completion)
}

fn parse_classwork(request: &ClassworkRequest, payload: Value) -> Result<Classwork> {
    let payload: ClassworkPayload = serde_json::from_value(payload)
        .map_err(|e| HenotaceError::Parse(format!("invalid classwork payload: {e}")))?;
    Classwork::from_questions(request, payload.questions)
}

#[async_trait]
impl TutorApi for HenotaceClient {
    async fn status(&self) -> Result<ApiStatus> {
        let payload = self.send(Method::GET, STATUS_PATH, None).await?;
        parse_status(payload)
    }

    async fn complete_chat(&self, request: &ChatRequest) -> Result<ChatCompletion> {
        if request.input.trim().is_empty() {
            return Err(HenotaceError::InvalidInput("chat input must not be empty".into()));
        }

        debug!(
            history = request.history.len(),
            subject = request.subject.as_deref().unwrap_or(""),
            "chat completion"
        );

        let body = serde_json::to_value(request)
            .map_err(|e| HenotaceError::Parse(format!("failed to encode chat request: {e}")))?;
        let payload = self.send(Method::POST, CHAT_COMPLETION_PATH, Some(&body)).await?;
        parse_completion(payload)
    }

    async fn generate_classwork(&self, request: &ClassworkRequest) -> Result<Classwork> {
        request.validate()?;

        debug!(
            subject = %request.subject,
            topic = %request.topic,
            count = request.question_count,
            difficulty = %request.difficulty,
            "classwork generation"
        );

        let body = serde_json::to_value(request)
            .map_err(|e| HenotaceError::Parse(format!("failed to encode classwork request: {e}")))?;
        let payload = self.send(Method::POST, CLASSWORK_PATH, Some(&body)).await?;
        parse_classwork(request, payload)
    }
}
