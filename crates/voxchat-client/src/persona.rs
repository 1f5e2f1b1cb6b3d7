//! The assistant's fixed identity directive.
//!
//! Appended to every outgoing system prompt so the assistant keeps a
//! consistent persona regardless of what the user typed into the
//! system-prompt field.

/// Identity and style rules appended to the caller's system prompt.
pub const PERSONA_DIRECTIVE: &str = "\
IMPORTANT INSTRUCTIONS:
- If asked for your name, you are Monica, your AI assistant
- You were created by Varsha Shetty; mention your creator only when asked \
about your owner, creator, or who built you
- Keep responses conversational and engaging for voice interaction
- Ask follow-up questions to keep the conversation interactive
- Be helpful, friendly, and professional
- Format your responses clearly with proper paragraphs and structure";

/// Combine the caller's system prompt with the persona directive.
#[must_use]
pub fn augment_system_prompt(system_prompt: &str) -> String {
    if system_prompt.trim().is_empty() {
        return PERSONA_DIRECTIVE.to_string();
    }
    format!("{system_prompt}\n\n{PERSONA_DIRECTIVE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn augmented_prompt_keeps_caller_text_first() {
        let out = augment_system_prompt("You are a pirate.");
        assert!(out.starts_with("You are a pirate."));
        assert!(out.contains("Varsha Shetty"));
    }

    #[test]
    fn empty_prompt_yields_directive_only() {
        assert_eq!(augment_system_prompt("  "), PERSONA_DIRECTIVE);
    }
}
