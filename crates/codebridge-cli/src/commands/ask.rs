use super::utils::read_source;
use anyhow::Result;
use codebridge_application::Studio;
use colored::Colorize;
use std::path::Path;

pub async fn ask(studio: &Studio, question: &str, file: Option<&Path>) -> Result<()> {
    if let Some(file) = file {
        studio.set_code(&read_source(file)?);
    }
    println!("{}", format!("> {}", question.trim()).green());
    let reply = studio.ask(question).await?;
    for line in reply.lines() {
        println!("{}", line.bright_blue());
    }
    Ok(())
}
