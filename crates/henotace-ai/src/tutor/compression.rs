//! Rolling history compression.
//!
//! Stored chats are never deleted. A cursor marks how much of the log has
//! been folded into a text summary; requests carry the summary plus the
//! chats after the cursor.

use crate::storage::Chat;
use crate::ChatMessage;

use super::types::CompressionSettings;

/// Characters kept from each side of a folded turn.
const CLIP_CHARS: usize = 160;

pub(crate) const SUMMARY_PREFIX: &str = "Summary of earlier conversation:\n";

/// Outcome of folding old turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Folded {
    pub cursor: usize,
    pub summary: String,
}

/// Fold every turn before the last `max_turns` (counted from `cursor`)
/// into `summary`. Returns `None` when nothing needs folding.
///
/// A turn starts at a student chat; leading replies with no student chat
/// before them are folded along with the first turn.
pub(crate) fn fold(
    chats: &[Chat],
    cursor: usize,
    summary: &str,
    settings: &CompressionSettings,
) -> Option<Folded> {
    let cursor = cursor.min(chats.len());
    let turn_starts: Vec<usize> = chats[cursor..]
        .iter()
        .enumerate()
        .filter(|(_, chat)| !chat.is_reply)
        .map(|(i, _)| cursor + i)
        .collect();

    if settings.max_turns == 0 || turn_starts.len() <= settings.max_turns {
        return None;
    }
    let cut = turn_starts[turn_starts.len() - settings.max_turns];

    let mut lines: Vec<String> = Vec::new();
    if !summary.is_empty() {
        lines.push(summary.to_string());
    }
    for chat in &chats[cursor..cut] {
        let speaker = if chat.is_reply { "Tutor" } else { "Student" };
        lines.push(format!("{speaker}: {}", clip(&chat.content, CLIP_CHARS)));
    }

    Some(Folded {
        cursor: cut,
        summary: keep_tail(&lines.join("\n"), settings.max_summary_chars),
    })
}

/// History to send: summary first (if any), then the unfolded chats.
pub(crate) fn request_history(chats: &[Chat], cursor: usize, summary: &str) -> Vec<ChatMessage> {
    let cursor = cursor.min(chats.len());
    let mut history = Vec::with_capacity(chats.len() - cursor + 1);
    if !summary.is_empty() {
        history.push(ChatMessage::assistant(format!("{SUMMARY_PREFIX}{summary}")));
    }
    history.extend(chats[cursor..].iter().map(Chat::to_message));
    history
}

fn clip(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut clipped: String = single_line.chars().take(max_chars).collect();
    clipped.push_str("...");
    clipped
}

/// Keep the last `max_chars` characters.
fn keep_tail(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    text.chars().skip(total - max_chars).collect()
}
