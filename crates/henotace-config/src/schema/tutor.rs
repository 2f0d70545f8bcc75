use serde::{Deserialize, Serialize};

/// History compression applied to every new tutor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompressionConfig {
    /// Most recent turns sent verbatim (valid range: 1-100).
    pub max_turns: usize,
    /// Upper bound on the rolling summary (valid range: 100-20000).
    pub max_summary_chars: usize,
    /// Compress after this many sends (valid range: 1-100).
    pub checkpoint_every: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_turns: 10,
            max_summary_chars: 1200,
            checkpoint_every: 5,
        }
    }
}

/// Defaults for newly created tutors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorDefaults {
    /// Language code forwarded with tutor requests.
    pub language: String,
    pub grade_level: Option<String>,
    pub compression: CompressionConfig,
}

impl Default for TutorDefaults {
    fn default() -> Self {
        Self {
            language: "en".into(),
            grade_level: None,
            compression: CompressionConfig::default(),
        }
    }
}
