use anyhow::{Context, Result};
use codebridge_application::Studio;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Reads a source file to send as the learner's code.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Prints the plain-text content of a mount point under a heading.
pub fn print_mount(studio: &Studio, id: &str, heading: &str) {
    println!("{}", format!("=== {} ===", heading).bright_magenta().bold());
    match studio.text(id) {
        Some(text) if !text.trim().is_empty() => println!("{}", text.trim_end()),
        _ => println!("{}", "(empty)".bright_black()),
    }
}
