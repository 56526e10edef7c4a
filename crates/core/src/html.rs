//! Minimal HTML helpers for rich-text fields.
//!
//! Update and description fields hold HTML produced by the rich-text editor.
//! The workflow only needs to know whether such a field carries any visible
//! text, and the dashboard fragment needs plain text escaped safely.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a single HTML tag (including comments and self-closing tags).
const TAG_PATTERN: &str = r"(?s)<!--.*?-->|<[^>]*>";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TAG_PATTERN).expect("valid regex"));

/// Remove every HTML tag from `input`, keeping the text between tags.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// True when `input` contains visible text once tags, `&nbsp;` entities and
/// surrounding whitespace are removed.
///
/// `"<p><br></p>"` (what an emptied editor submits) has no visible text.
pub fn has_visible_text(input: &str) -> bool {
    let stripped = strip_tags(input);
    !stripped
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .is_empty()
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
