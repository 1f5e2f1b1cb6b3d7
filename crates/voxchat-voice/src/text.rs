//! Text cleanup for speech output.
//!
//! Chat replies carry light markup that reads fine on screen but
//! sounds wrong when vocalised. [`strip_for_speech`] reduces a reply
//! to plain sentences before it reaches the synthesis backend.

/// Prepare a chat reply for vocalisation.
///
/// Removes HTML tags, bold markers and inline-code backticks, drops
/// heading markers, and converts line breaks into sentence pauses so
/// the synthesiser does not read markup aloud.
#[must_use]
pub fn strip_for_speech(text: &str) -> String {
    let text = strip_html_tags(text);
    let text = strip_bold_markers(&text);
    let text = strip_inline_code(&text);
    let text = strip_heading_markers(&text);
    let text = newlines_to_pauses(&text);
    collapse_whitespace(&text)
}

/// Replace `<...>` tag spans with a single space.
fn strip_html_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Remove `**` emphasis markers, keeping the emphasised text.
fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

/// Unwrap `` `code` `` spans, keeping their content.
fn strip_inline_code(text: &str) -> String {
    text.replace('`', "")
}

/// Drop leading `#` heading markers from each line.
fn strip_heading_markers(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let hashes = trimmed.chars().take_while(|c| *c == '#').count();
            if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
                trimmed[hashes + 1..].to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn runs of line breaks into a sentence pause.
fn newlines_to_pauses(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_break = false;
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' {
            pending_break = true;
        } else {
            if pending_break {
                let trimmed = out.trim_end();
                let needs_period = !trimmed.is_empty()
                    && !trimmed.ends_with(['.', '!', '?', ':', ';']);
                out.truncate(trimmed.len());
                if needs_period {
                    out.push('.');
                }
                out.push(' ');
                pending_break = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Collapse whitespace runs into single spaces and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bold_and_inline_code() {
        assert_eq!(strip_for_speech("**Bold** and `code`"), "Bold and code");
    }

    #[test]
    fn strips_html_tags() {
        assert_eq!(
            strip_for_speech("Hello <strong>world</strong>!"),
            "Hello world !"
        );
    }

    #[test]
    fn strips_heading_markers() {
        assert_eq!(
            strip_for_speech("## Setup\nInstall the tool."),
            "Setup. Install the tool."
        );
    }

    #[test]
    fn newlines_become_sentence_pauses() {
        assert_eq!(
            strip_for_speech("First line\n\nSecond line."),
            "First line. Second line."
        );
    }

    #[test]
    fn keeps_existing_terminal_punctuation() {
        assert_eq!(
            strip_for_speech("Done!\nNext step"),
            "Done! Next step"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_for_speech("Just a sentence."), "Just a sentence.");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(strip_for_speech(""), "");
        assert_eq!(strip_for_speech("  \n "), "");
    }
}
