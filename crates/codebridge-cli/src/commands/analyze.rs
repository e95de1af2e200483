use super::utils::{print_mount, read_source};
use anyhow::Result;
use codebridge_application::Studio;
use codebridge_application::document::mounts;
use std::path::Path;

pub async fn analyze(studio: &Studio, file: &Path) -> Result<()> {
    studio.set_code(&read_source(file)?);
    // The panel shows the error too, so print it either way.
    let analyzed = studio.analyze_complexity().await;
    print_mount(studio, mounts::COMPLEXITY, "Complexity");
    analyzed?;
    Ok(())
}
