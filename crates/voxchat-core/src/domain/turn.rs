//! A single conversation turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The side that produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

impl Speaker {
    /// Parse a speaker from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }

    /// Convert speaker to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One utterance by either side, recorded in order.
///
/// A turn is immutable once appended to the [`ConversationLog`]; the log
/// is its exclusive owner.
///
/// [`ConversationLog`]: crate::domain::ConversationLog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke.
    pub speaker: Speaker,
    /// What was said (raw text, display formatting is applied downstream).
    pub text: String,
    /// When the turn was recorded.
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
