//! End-to-end smoke run against a live deployment.
//!
//! Exercises chat completion, classwork generation at every difficulty,
//! a full tutor conversation and invalid-key rejection, then writes a
//! JSON report.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use henotace_ai::{
    ChatMessage, ChatRequest, ClassworkRequest, Difficulty, Henotace, HenotaceError, Result,
    SessionSubject, TutorOptions,
};

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    Failed,
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub test: String,
    pub status: Outcome,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseResult {
    fn from_result(test: &str, started: Instant, result: Result<String>) -> Self {
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match result {
            Ok(detail) => {
                info!(test, elapsed_ms, "passed");
                Self {
                    test: test.to_string(),
                    status: Outcome::Success,
                    elapsed_ms,
                    detail: Some(detail),
                    error: None,
                }
            }
            Err(err) => {
                warn!(test, error = %err, "failed");
                Self {
                    test: test.to_string(),
                    status: Outcome::Failed,
                    elapsed_ms,
                    detail: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn passed(&self) -> bool {
        self.status == Outcome::Success
    }
}

/// Everything written to the results file. The API key is never included.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub timestamp: String,
    pub sdk_version: &'static str,
    pub base_url: String,
    pub status_check: CaseResult,
    pub chat_completion: Vec<CaseResult>,
    pub classwork_generation: Vec<CaseResult>,
    pub tutor_functionality: CaseResult,
    pub error_handling: CaseResult,
    pub passed: usize,
    pub total: usize,
}

impl SmokeReport {
    fn cases(&self) -> impl Iterator<Item = &CaseResult> {
        std::iter::once(&self.status_check)
            .chain(&self.chat_completion)
            .chain(&self.classwork_generation)
            .chain([&self.tutor_functionality, &self.error_handling])
    }

    fn tally(&mut self) {
        self.total = self.cases().count();
        self.passed = self.cases().filter(|c| c.passed()).count();
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HenotaceError::Parse(format!("failed to encode report: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn print_summary(&self) {
        let count = |cases: &[CaseResult]| cases.iter().filter(|c| c.passed()).count();
        let mark = |case: &CaseResult| if case.passed() { "PASSED" } else { "FAILED" };

        println!("Status check:          {}", mark(&self.status_check));
        println!(
            "Chat completion:       {}/{} passed",
            count(&self.chat_completion[..]),
            self.chat_completion.len()
        );
        println!(
            "Classwork generation:  {}/{} passed",
            count(&self.classwork_generation[..]),
            self.classwork_generation.len()
        );
        println!("Tutor functionality:   {}", mark(&self.tutor_functionality));
        println!("Error handling:        {}", mark(&self.error_handling));
        println!("Overall: {}/{} passed", self.passed, self.total);

        for case in self.cases().filter(|c| !c.passed()) {
            println!(
                "  {}: {}",
                case.test,
                case.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

/// Run every scenario. `invalid` must be built with a key the server rejects.
pub async fn run(sdk: &Henotace, invalid: &Henotace, base_url: &str) -> SmokeReport {
    let mut report = SmokeReport {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        sdk_version: env!("CARGO_PKG_VERSION"),
        base_url: base_url.to_string(),
        status_check: status_case(sdk).await,
        chat_completion: chat_cases(sdk).await,
        classwork_generation: classwork_cases(sdk).await,
        tutor_functionality: tutor_case(sdk).await,
        error_handling: invalid_key_case(invalid).await,
        passed: 0,
        total: 0,
    };
    report.tally();
    report
}

async fn status_case(sdk: &Henotace) -> CaseResult {
    let started = Instant::now();
    let result = sdk.status().await.and_then(|status| {
        if status.success {
            Ok(format!("{}: {}", status.data.status, status.data.message))
        } else {
            Err(HenotaceError::Api {
                status: 200,
                message: status.data.message,
            })
        }
    });
    CaseResult::from_result("Status Check", started, result)
}

async fn chat_cases(sdk: &Henotace) -> Vec<CaseResult> {
    let cases = [
        (
            "Basic Math Question",
            vec![ChatMessage::user("Hello, I need help with math")],
            "What is 2 + 2?",
            "mathematics",
            "basic arithmetic",
        ),
        (
            "Algebra Problem",
            vec![
                ChatMessage::user("I need help with algebra"),
                ChatMessage::assistant(
                    "I'd be happy to help you with algebra! What specific topic are you working on?",
                ),
            ],
            "How do I solve 2x + 5 = 13?",
            "mathematics",
            "algebra",
        ),
        (
            "Science Question",
            vec![ChatMessage::user("I'm studying science")],
            "Explain photosynthesis briefly",
            "science",
            "biology",
        ),
        ("Empty History", Vec::new(), "test message", "general", "general"),
    ];

    let mut results = Vec::with_capacity(cases.len());
    for (name, history, input, subject, topic) in cases {
        let started = Instant::now();
        let request = ChatRequest::new(history, input)
            .with_subject(subject)
            .with_topic(topic);
        let result = sdk
            .complete_chat(&request)
            .await
            .map(|completion| preview(&completion.ai_response));
        results.push(CaseResult::from_result(name, started, result));
    }
    results
}

fn classwork_history() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("I need help understanding linear equations"),
        ChatMessage::assistant(
            "Linear equations are equations where the highest power of the variable is 1. For example, 2x + 3 = 7 is a linear equation.",
        ),
        ChatMessage::user("How do I solve 2x + 5 = 13?"),
        ChatMessage::assistant(
            "Subtract 5 from both sides to get 2x = 8, then divide both sides by 2: x = 4.",
        ),
        ChatMessage::user("How do I check if my answer is correct?"),
        ChatMessage::assistant(
            "Substitute the value back into the original equation: 2(4) + 5 = 13, which matches.",
        ),
    ]
}

async fn classwork_cases(sdk: &Henotace) -> Vec<CaseResult> {
    let mut results = Vec::new();
    for (difficulty, count) in Difficulty::ALL.into_iter().zip([3, 5, 4]) {
        let name = format!("{} Difficulty - {count} Questions", capitalize(difficulty.as_str()));
        let started = Instant::now();
        let request = ClassworkRequest::new(
            classwork_history(),
            "mathematics",
            "linear equations",
            count,
            difficulty,
        );
        let result = sdk.generate_classwork(&request).await.map(|classwork| {
            let sample = classwork
                .questions
                .first()
                .map(|q| preview(&q.question))
                .unwrap_or_default();
            format!("{} questions; first: {sample}", classwork.len())
        });
        results.push(CaseResult::from_result(&name, started, result));
    }
    results
}

async fn tutor_case(sdk: &Henotace) -> CaseResult {
    let started = Instant::now();
    CaseResult::from_result("Tutor Conversation", started, tutor_conversation(sdk).await)
}

async fn tutor_conversation(sdk: &Henotace) -> Result<String> {
    let mut tutor = sdk.create_tutor(
        TutorOptions::new("smoke_student_001")
            .with_name("Math Tutor")
            .with_subject(SessionSubject::new("mathematics", "Mathematics").with_topic("Algebra")),
    )?;
    tutor.set_persona(
        "You are an enthusiastic math tutor who explains algebra clearly with step-by-step examples.",
    );

    let messages = [
        "I need help with solving equations",
        "Can you show me how to solve 3x - 7 = 14?",
        "What about checking my answer?",
        "How do I solve equations with variables on both sides?",
    ];
    for message in messages {
        let before = tutor.history()?.len();
        tutor.send(message, None).await?;
        let after = tutor.history()?.len();
        if after != before + 2 {
            return Err(HenotaceError::Storage(format!(
                "history grew by {} entries after one send",
                after.saturating_sub(before)
            )));
        }
    }

    let classwork = tutor.generate_classwork(4, Difficulty::Medium).await?;
    Ok(format!(
        "tutor {}: {} messages, {} questions",
        tutor.tutor_id(),
        messages.len(),
        classwork.len()
    ))
}

async fn invalid_key_case(invalid: &Henotace) -> CaseResult {
    let started = Instant::now();
    let request = ChatRequest::new(vec![ChatMessage::user("test")], "test message");
    let result = match invalid.complete_chat(&request).await {
        Ok(_) => Err(HenotaceError::InvalidInput(
            "invalid API key was not rejected".into(),
        )),
        Err(err) if err.is_auth() => Ok(format!("rejected: {err}")),
        Err(err) => Err(err),
    };
    CaseResult::from_result("Invalid API Key", started, result)
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
