//! Response length hints.
//!
//! The server tailors answer length to a verbosity level. Unless a tutor
//! pins one, the level is inferred from wording in the student's message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HenotaceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// One or two sentences.
    Brief,
    #[default]
    Normal,
    Detailed,
    /// Long-form, guide-style answers.
    Comprehensive,
}

const COMPREHENSIVE_CUES: &[&str] = &[
    "comprehensive",
    "in depth",
    "complete guide",
    "full guide",
    "everything about",
];

const DETAILED_CUES: &[&str] = &[
    "detailed",
    "in detail",
    "elaborate",
    "step by step",
    "thorough",
];

const BRIEF_CUES: &[&str] = &[
    "briefly",
    "brief",
    "short",
    "quick",
    "summarize",
    "summarise",
    "tl;dr",
    "in one sentence",
];

impl Verbosity {
    /// Infer the level from cue words, most verbose first.
    ///
    /// Cues match whole words only, so "shortest" is not "short".
    pub fn detect(text: &str) -> Self {
        let words = word_run(text);
        let has_any = |cues: &[&str]| cues.iter().any(|cue| words.contains(&word_run(cue)));

        if has_any(COMPREHENSIVE_CUES) {
            Self::Comprehensive
        } else if has_any(DETAILED_CUES) {
            Self::Detailed
        } else if has_any(BRIEF_CUES) {
            Self::Brief
        } else {
            Self::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Normal => "normal",
            Self::Detailed => "detailed",
            Self::Comprehensive => "comprehensive",
        }
    }
}

/// Lowercase words separated and surrounded by single spaces.
fn word_run(text: &str) -> String {
    let mut run = String::from(" ");
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        run.push_str(&word.to_lowercase());
        run.push(' ');
    }
    run
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = HenotaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brief" => Ok(Self::Brief),
            "normal" => Ok(Self::Normal),
            "detailed" => Ok(Self::Detailed),
            "comprehensive" => Ok(Self::Comprehensive),
            other => Err(HenotaceError::InvalidInput(format!(
                "unknown verbosity {other:?} (expected brief, normal, detailed or comprehensive)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_level() {
        assert_eq!(Verbosity::detect("Briefly explain gravity"), Verbosity::Brief);
        assert_eq!(Verbosity::detect("What is gravity?"), Verbosity::Normal);
        assert_eq!(
            Verbosity::detect("Can you give me a detailed explanation of gravity?"),
            Verbosity::Detailed
        );
        assert_eq!(
            Verbosity::detect("I need a comprehensive guide to gravity"),
            Verbosity::Comprehensive
        );
    }

    #[test]
    fn most_verbose_cue_wins() {
        assert_eq!(
            Verbosity::detect("A quick but comprehensive overview please"),
            Verbosity::Comprehensive
        );
        assert_eq!(
            Verbosity::detect("Short answer, but step by step"),
            Verbosity::Detailed
        );
    }

    #[test]
    fn cues_match_whole_words_only() {
        assert_eq!(
            Verbosity::detect("What is the shortest path?"),
            Verbosity::Normal
        );
        assert_eq!(Verbosity::detect("How does quicksort work?"), Verbosity::Normal);
        assert_eq!(Verbosity::detect("Keep it short."), Verbosity::Brief);
        assert_eq!(Verbosity::detect("tl;dr of the water cycle"), Verbosity::Brief);
        assert_eq!(
            Verbosity::detect("An in-depth look at cells"),
            Verbosity::Comprehensive
        );
        assert_eq!(
            Verbosity::detect("Solve it step-by-step"),
            Verbosity::Detailed
        );
    }

    #[test]
    fn detection_ignores_case() {
        assert_eq!(Verbosity::detect("BRIEFLY, what is pi?"), Verbosity::Brief);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("Detailed".parse::<Verbosity>().unwrap(), Verbosity::Detailed);
        assert!("verbose".parse::<Verbosity>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Verbosity::Comprehensive).unwrap(),
            "\"comprehensive\""
        );
    }
}
