//! Markup helpers: HTML escaping, built-in templates, the assistant's
//! markdown subset, and a markup-to-text view for terminals.

pub mod markdown;
pub mod templates;
pub mod text;

pub use markdown::markdown_lite;
pub use templates::render;
pub use text::html_to_text;

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
