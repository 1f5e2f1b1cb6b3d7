//! Model provider catalog.
//!
//! The provider selection drives the available model list in the UI; the
//! catalog is static because the backend only routes to these providers.

use serde::{Deserialize, Serialize};

/// A chat model provider the backend can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelProvider {
    Groq,
    OpenAI,
}

impl ModelProvider {
    /// All known providers, in display order.
    pub const ALL: [Self; 2] = [Self::Groq, Self::OpenAI];

    /// Parse a provider from its wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Groq" => Some(Self::Groq),
            "OpenAI" => Some(Self::OpenAI),
            _ => None,
        }
    }

    /// Wire name of the provider, as the backend expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groq => "Groq",
            Self::OpenAI => "OpenAI",
        }
    }

    /// Models this provider serves.
    #[must_use]
    pub const fn available_models(self) -> &'static [&'static str] {
        match self {
            Self::Groq => &["llama-3.3-70b-versatile", "mixtral-8x7b-32768"],
            Self::OpenAI => &["gpt-4o-mini"],
        }
    }

    /// The model pre-selected when this provider is chosen.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        self.available_models()[0]
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
