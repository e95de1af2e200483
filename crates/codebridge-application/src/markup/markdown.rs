//! The markdown subset used for assistant replies.
//!
//! Conversions run in a fixed order: fenced code, `**bold**`, `*italic*`,
//! then newlines. Later passes see the output of earlier ones, so newlines
//! inside code blocks also become `<br>` and asterisks inside code are
//! still treated as emphasis.

use super::escape_html;
use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)```").expect("fenced code pattern is valid"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));

/// Converts assistant text to markup. The text is HTML-escaped first.
pub fn markdown_lite(content: &str) -> String {
    let escaped = escape_html(content);
    let with_code = FENCED_CODE.replace_all(&escaped, "<pre><code>$1</code></pre>");
    let with_bold = BOLD.replace_all(&with_code, "<strong>$1</strong>");
    let with_italic = ITALIC.replace_all(&with_bold, "<em>$1</em>");
    with_italic.replace('\n', "<br>")
}
