//! Markdown-to-HTML rendering for displayed replies.
//!
//! The chat backend answers in light Markdown. [`render_markdown`]
//! converts the subset the assistant actually produces into HTML for
//! the display surface: fenced code blocks, headings, numbered and
//! bulleted lists, paragraphs, bold and inline code.

/// Render a reply's Markdown into display HTML.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut paragraph: Vec<String> = Vec::new();
    let mut list: Option<ListKind> = None;
    let mut code: Option<Vec<String>> = None;

    for line in text.lines() {
        // Fenced code blocks swallow every line until the closing fence.
        if let Some(lines) = code.as_mut() {
            if line.trim_start().starts_with("```") {
                out.push_str("<pre><code>");
                out.push_str(&escape_html(&lines.join("\n")));
                out.push_str("</code></pre>");
                code = None;
            } else {
                lines.push(line.to_string());
            }
            continue;
        }
        if line.trim_start().starts_with("```") {
            flush_paragraph(&mut out, &mut paragraph);
            close_list(&mut out, &mut list);
            code = Some(Vec::new());
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            close_list(&mut out, &mut list);
            continue;
        }

        if let Some((level, rest)) = heading(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            close_list(&mut out, &mut list);
            out.push_str(&format!(
                "<h{level}>{}</h{level}>",
                render_inline(rest)
            ));
            continue;
        }

        if let Some(item) = numbered_item(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            open_list(&mut out, &mut list, ListKind::Ordered);
            out.push_str(&format!("<li>{}</li>", render_inline(item)));
            continue;
        }

        if let Some(item) = bullet_item(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            open_list(&mut out, &mut list, ListKind::Unordered);
            out.push_str(&format!("<li>{}</li>", render_inline(item)));
            continue;
        }

        close_list(&mut out, &mut list);
        paragraph.push(trimmed.to_string());
    }

    // An unterminated fence still renders as code.
    if let Some(lines) = code {
        out.push_str("<pre><code>");
        out.push_str(&escape_html(&lines.join("\n")));
        out.push_str("</code></pre>");
    }
    flush_paragraph(&mut out, &mut paragraph);
    close_list(&mut out, &mut list);
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    const fn open_tag(self) -> &'static str {
        match self {
            Self::Ordered => "<ol>",
            Self::Unordered => "<ul>",
        }
    }

    const fn close_tag(self) -> &'static str {
        match self {
            Self::Ordered => "</ol>",
            Self::Unordered => "</ul>",
        }
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=3).contains(&hashes) && line[hashes..].starts_with(' ') {
        Some((hashes, line[hashes + 1..].trim_start()))
    } else {
        None
    }
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with(". ") {
        Some(line[digits + 2..].trim_start())
    } else {
        None
    }
}

fn bullet_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim_start)
}

/// Render bold and inline-code spans within a line.
fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let with_bold = replace_paired(&escaped, "**", "<strong>", "</strong>");
    replace_paired(&with_bold, "`", "<code>", "</code>")
}

/// Replace paired occurrences of `marker` with open/close tags. An
/// unpaired trailing marker is left as-is.
fn replace_paired(text: &str, marker: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(start) = rest.find(marker) else {
            out.push_str(rest);
            return out;
        };
        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);
        out.push_str(open);
        out.push_str(&after[..end]);
        out.push_str(close);
        rest = &after[end + marker.len()..];
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
    if !paragraph.is_empty() {
        out.push_str("<p>");
        out.push_str(&render_inline(&paragraph.join(" ")));
        out.push_str("</p>");
        paragraph.clear();
    }
}

fn open_list(out: &mut String, list: &mut Option<ListKind>, kind: ListKind) {
    if *list != Some(kind) {
        close_list(out, list);
        out.push_str(kind.open_tag());
        *list = Some(kind);
    }
}

fn close_list(out: &mut String, list: &mut Option<ListKind>) {
    if let Some(kind) = list.take() {
        out.push_str(kind.close_tag());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings() {
        assert_eq!(render_markdown("# Title"), "<h1>Title</h1>");
        assert_eq!(render_markdown("## Sub"), "<h2>Sub</h2>");
        assert_eq!(render_markdown("### Deep"), "<h3>Deep</h3>");
    }

    #[test]
    fn renders_paragraphs_on_blank_lines() {
        assert_eq!(
            render_markdown("First para.\n\nSecond para."),
            "<p>First para.</p><p>Second para.</p>"
        );
    }

    #[test]
    fn renders_bold_and_inline_code() {
        assert_eq!(
            render_markdown("Use **cargo** and `rustc`."),
            "<p>Use <strong>cargo</strong> and <code>rustc</code>.</p>"
        );
    }

    #[test]
    fn renders_bulleted_list() {
        assert_eq!(
            render_markdown("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn renders_numbered_list() {
        assert_eq!(
            render_markdown("1. first\n2. second"),
            "<ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn renders_fenced_code_block_with_escaping() {
        assert_eq!(
            render_markdown("```\nlet x = a < b;\n```"),
            "<pre><code>let x = a &lt; b;</code></pre>"
        );
    }

    #[test]
    fn code_block_content_is_not_styled() {
        assert_eq!(
            render_markdown("```\n**not bold**\n```"),
            "<pre><code>**not bold**</code></pre>"
        );
    }

    #[test]
    fn unpaired_marker_is_left_alone() {
        assert_eq!(
            render_markdown("a ** b"),
            "<p>a ** b</p>"
        );
    }

    #[test]
    fn mixed_document_renders_in_order() {
        let markup = render_markdown("## Steps\n1. build\n2. run\n\nDone.");
        assert_eq!(
            markup,
            "<h2>Steps</h2><ol><li>build</li><li>run</li></ol><p>Done.</p>"
        );
    }
}
