use std::path::PathBuf;

use clap::{Parser, Subcommand};
use henotace_ai::Difficulty;

/// Henotace tutoring API client.
#[derive(Parser, Debug)]
#[command(name = "henotace", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// API key (defaults to HENOTACE_API_KEY).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the API is reachable and the key is accepted.
    Status,

    /// One-shot chat completion.
    Chat {
        input: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        /// JSON array of `{ "role", "content" }` messages.
        #[arg(long)]
        history_file: Option<PathBuf>,
    },

    /// Generate practice questions.
    Classwork {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value_t = 5)]
        count: u32,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(long)]
        history_file: Option<PathBuf>,
    },

    /// Run a short tutoring conversation.
    Tutor {
        #[arg(long)]
        student: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, requires = "subject")]
        topic: Option<String>,
        #[arg(long)]
        persona: Option<String>,
        /// Generate this many questions after the conversation.
        #[arg(long)]
        classwork: Option<u32>,
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Exercise every endpoint against the live API and record the results.
    Smoke {
        #[arg(long, default_value = "test_results.json")]
        output: PathBuf,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
