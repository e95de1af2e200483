use super::utils::{print_mount, read_source};
use anyhow::Result;
use codebridge_application::Studio;
use codebridge_application::document::mounts;
use codebridge_application::visual_output::{visualize, Visualization};
use std::path::Path;

pub async fn execute(studio: &Studio, file: &Path) -> Result<()> {
    studio.set_code(&read_source(file)?);
    let response = studio.execute_code().await?;

    print_mount(studio, mounts::CONSOLE_OUTPUT, "Output");
    let concept = studio.selection().concept;
    if !matches!(visualize(&concept, ""), Visualization::Placeholder) {
        print_mount(studio, mounts::OUTPUT_WINDOW, "Visual Output");
    }
    print_mount(studio, mounts::REAL_WORLD, "Real-World Example");

    if !response.success {
        anyhow::bail!("Execution failed");
    }
    Ok(())
}
