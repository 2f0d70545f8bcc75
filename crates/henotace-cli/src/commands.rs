//! Subcommand implementations.

use std::path::Path;
use std::process::ExitCode;

use tracing::info;

use henotace_ai::{
    ChatMessage, ChatRequest, Classwork, ClassworkRequest, ClientConfig, Difficulty, Henotace,
    HenotaceError, Result, SessionSubject, TutorOptions,
};
use henotace_config::{api_key_from_env, HenotaceConfig};

use crate::cli::Command;
use crate::smoke;

/// Key used by the smoke run to check that bad credentials are rejected.
const INVALID_SMOKE_KEY: &str = "invalid_key_henotace_smoke";

pub async fn run(
    command: Command,
    config: &HenotaceConfig,
    api_key: Option<String>,
) -> Result<ExitCode> {
    let key = match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key,
        None => api_key_from_env()?,
    };
    let sdk = build_sdk(config, key)?;

    match command {
        Command::Status => {
            let status = sdk.status().await?;
            println!("{}: {}", status.data.status, status.data.message);
            Ok(if status.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Chat {
            input,
            subject,
            topic,
            history_file,
        } => {
            let mut request = ChatRequest::new(read_history(history_file.as_deref())?, input);
            request.subject = subject;
            request.topic = topic;
            let completion = sdk.complete_chat(&request).await?;
            println!("{}", completion.ai_response);
            Ok(ExitCode::SUCCESS)
        }

        Command::Classwork {
            subject,
            topic,
            count,
            difficulty,
            history_file,
        } => {
            let request = ClassworkRequest::new(
                read_history(history_file.as_deref())?,
                subject,
                topic,
                count,
                difficulty,
            );
            let classwork = sdk.generate_classwork(&request).await?;
            print_classwork(&classwork);
            Ok(ExitCode::SUCCESS)
        }

        Command::Tutor {
            student,
            name,
            subject,
            topic,
            persona,
            classwork,
            messages,
        } => {
            let mut options = TutorOptions::new(student);
            if let Some(name) = name {
                options = options.with_name(name);
            }
            if let Some(subject) = subject {
                let mut session_subject = SessionSubject::new(subject.to_lowercase(), subject);
                if let Some(topic) = topic {
                    session_subject = session_subject.with_topic(topic);
                }
                options = options.with_subject(session_subject);
            }

            let mut tutor = sdk.create_tutor(options)?;
            if let Some(persona) = persona {
                tutor.set_persona(persona);
            }

            for message in &messages {
                let reply = tutor.send(message, None).await?;
                println!("Student: {message}");
                println!("Tutor: {reply}\n");
            }

            if let Some(count) = classwork {
                let generated = tutor.generate_classwork(count, Difficulty::default()).await?;
                print_classwork(&generated);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Smoke { output } => {
            let invalid = build_sdk(config, INVALID_SMOKE_KEY.to_string())?;
            let report = smoke::run(&sdk, &invalid, &config.api.base_url).await;
            report.print_summary();
            report.write_to(&output)?;
            info!(path = %output.display(), "wrote smoke results");
            println!("Results saved to {}", output.display());
            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn build_sdk(config: &HenotaceConfig, api_key: String) -> Result<Henotace> {
    let sdk = Henotace::new(ClientConfig::from_config(config, api_key))?;
    sdk.with_tutor_defaults(config.tutor.clone())
}

/// Read a JSON array of chat messages; no file means no history.
pub(crate) fn read_history(path: Option<&Path>) -> Result<Vec<ChatMessage>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        HenotaceError::Parse(format!("invalid history file {}: {e}", path.display()))
    })
}

fn print_classwork(classwork: &Classwork) {
    println!(
        "{} questions ({}, {}, {})",
        classwork.len(),
        classwork.subject,
        classwork.topic,
        classwork.difficulty
    );
    for (i, question) in classwork.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.question);
        for (letter, option) in ('A'..='Z').zip(&question.options) {
            println!("   {letter}) {option}");
        }
        if let Some(answer) = &question.correct_answer {
            println!("   answer: {answer}");
        }
    }
}
