use anyhow::Result;
use codebridge_application::Studio;
use colored::Colorize;

pub async fn check(studio: &Studio) -> Result<()> {
    let (availability, user) = tokio::join!(studio.check_api_status(), studio.check_auth_status());

    let text = availability.status_text();
    if availability.available {
        println!("{} {}", "Assistant:".bold(), text.green());
    } else {
        println!("{} {}", "Assistant:".bold(), text.red());
    }
    if let Some(source) = availability.source {
        println!("  key source: {}", source);
    }
    if let Some(error) = &availability.error {
        println!("  {}", error.yellow());
    }
    if let Some(details) = &availability.details {
        println!("  {}", details.bright_black());
    }

    match user {
        Some(user) => println!("{} {}", "Account:".bold(), user.username.cyan()),
        None => println!("{} {}", "Account:".bold(), "not signed in".bright_black()),
    }
    Ok(())
}
