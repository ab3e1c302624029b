//! Conversation types: turns and the per-session history
//!
//! History is append-only and lives in process memory for the lifetime of
//! one session. Context for prompts is a sliding window over the most
//! recent turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// System message (instructions)
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::System => "system",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the speaker
    pub role: TurnRole,
    /// Content of the turn
    pub content: String,
    /// When the turn occurred
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// Append-only conversation history with sliding-window context.
///
/// Consecutive duplicates (same role, same content) are suppressed so a
/// re-submitted message does not inflate the prompt context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn unless it repeats the previous one verbatim
    pub fn push(&mut self, turn: Turn) {
        if let Some(last) = self.turns.last() {
            if last.role == turn.role && last.content == turn.content {
                return;
            }
        }
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Format the last `last_n` turns as `role: content` lines
    pub fn context(&self, last_n: usize) -> String {
        let start = self.turns.len().saturating_sub(last_n);
        self.turns[start..]
            .iter()
            .map(|t| format!("{}: {}", t.role, t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format recent turns within a token budget (~4 chars per token),
    /// filling newest-first so the latest exchange always survives.
    pub fn context_within(&self, max_tokens: usize) -> String {
        let max_chars = max_tokens * 4;
        let mut lines = Vec::new();
        let mut total_chars = 0;

        for turn in self.turns.iter().rev() {
            let line = format!("{}: {}", turn.role, turn.content);
            if total_chars + line.len() > max_chars {
                break;
            }
            total_chars += line.len();
            lines.push(line);
        }

        lines.reverse();
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let turn = Turn::user("I want to buy a flat");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "I want to buy a flat");
    }

    #[test]
    fn test_push_and_context() {
        let mut history = ConversationHistory::new();
        history.push(Turn::user("hello"));
        history.push(Turn::assistant("hi, how can I help?"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.context(10), "user: hello\nassistant: hi, how can I help?");
    }

    #[test]
    fn test_consecutive_duplicate_suppressed() {
        let mut history = ConversationHistory::new();
        history.push(Turn::user("same message"));
        history.push(Turn::user("same message"));

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_same_content_different_role_kept() {
        let mut history = ConversationHistory::new();
        history.push(Turn::user("ok"));
        history.push(Turn::assistant("ok"));

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_context_window_limits_turns() {
        let mut history = ConversationHistory::new();
        for i in 0..15 {
            history.push(Turn::user(format!("message {}", i)));
        }

        let context = history.context(10);
        assert!(!context.contains("message 4"));
        assert!(context.contains("message 5"));
        assert!(context.contains("message 14"));
    }

    #[test]
    fn test_context_within_budget_keeps_newest() {
        let mut history = ConversationHistory::new();
        history.push(Turn::user("a".repeat(200)));
        history.push(Turn::user("newest"));

        // Budget of 10 tokens = 40 chars: only the newest line fits
        let context = history.context_within(10);
        assert_eq!(context, "user: newest");
    }
}
