use super::utils::{print_mount, read_source};
use anyhow::Result;
use codebridge_application::Studio;
use codebridge_application::document::mounts;
use std::path::Path;

pub async fn show(studio: &Studio, file: &Path) -> Result<()> {
    let code = read_source(file)?;
    studio.set_code(&code);
    let updated = studio.update_real_world(&code).await;
    print_mount(studio, mounts::REAL_WORLD, "Real-World Example");
    updated?;
    Ok(())
}
