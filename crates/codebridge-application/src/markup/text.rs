//! Plain-text view of panel markup, for terminal front-ends.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|pre|tr|ul|ol|button)\s*>")
        .expect("block break pattern is valid")
});
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("list item pattern is valid"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

/// Strips tags, turns block boundaries into newlines and decodes entities.
pub fn html_to_text(markup: &str) -> String {
    let with_breaks = BLOCK_BREAK.replace_all(markup, "\n");
    let with_bullets = LIST_ITEM.replace_all(&with_breaks, "- ");
    let stripped = TAG.replace_all(&with_bullets, "");

    let lines: Vec<&str> = stripped.lines().map(str::trim).collect();
    let joined = decode_entities(&lines.join("\n"));
    BLANK_RUN.replace_all(&joined, "\n\n").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&#x2f;", "/")
        .replace("&times;", "×")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
