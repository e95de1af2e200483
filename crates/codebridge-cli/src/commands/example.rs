use anyhow::Result;
use codebridge_core::catalog::{self, ConceptRegistry};
use codebridge_core::config::AppConfig;
use codebridge_core::Concept;
use colored::Colorize;

/// Prints a concept's description, example and real-world counterpart from
/// the built-in catalog. No network access.
pub fn show(config: &AppConfig, concept: &Concept) -> Result<()> {
    let registry = ConceptRegistry::builtin();
    let language = config.defaults.language;
    let description = registry.description(concept);

    println!("{}", description.title.bright_magenta().bold());
    if !description.description.is_empty() {
        println!("{}", description.description);
    }
    if !description.real_world_use.is_empty() {
        println!("{} {}", "Real-world use:".bold(), description.real_world_use);
    }

    let provider = registry.get(concept);
    let code = provider
        .as_ref()
        .and_then(|provider| provider.example_code(language))
        .unwrap_or_else(|| catalog::PLACEHOLDER_EXAMPLE.to_string());
    println!();
    println!("{}", format!("--- {} example ---", language).cyan());
    println!("{}", code);

    if let Some(example) = provider.and_then(|provider| provider.real_world(language)) {
        println!();
        println!("{}", format!("--- {} ---", example.title).cyan());
        println!("{}", example.description);
        println!("{}", example.code);
    }

    if !registry.contains(concept) {
        println!();
        println!(
            "{} {}",
            "Known concepts:".bright_black(),
            registry.names().join(", ").bright_black()
        );
    }
    Ok(())
}
