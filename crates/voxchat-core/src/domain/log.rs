//! Append-only conversation log with a rolling display window.

use super::turn::{Speaker, Turn};

/// Number of most-recent turns exposed for display.
pub const DISPLAY_WINDOW: usize = 4;

/// Ordered record of conversation turns.
///
/// Storage is unbounded; only the display window is bounded. Turns are
/// never reordered or mutated after append; `append` is the only
/// mutator apart from the whole-session [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// Create an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Record a turn at the end of the log. O(1) amortised.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let turn = Turn::new(speaker, text);
        tracing::debug!(speaker = %turn.speaker, chars = turn.text.len(), "Turn appended");
        self.turns.push(turn);
        self.turns.last().expect("push guarantees non-empty")
    }

    /// The most recent `n` turns, oldest first, or all turns if fewer exist.
    #[must_use]
    pub fn recent_window(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// All turns, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of recorded turns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the log holds no turns.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Discard all turns. Used only when a new session starts.
    pub fn reset(&mut self) {
        if !self.turns.is_empty() {
            tracing::debug!(discarded = self.turns.len(), "Conversation log reset");
        }
        self.turns.clear();
    }
}
