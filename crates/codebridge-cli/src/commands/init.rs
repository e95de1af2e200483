use anyhow::{bail, Context, Result};
use codebridge_core::config::AppConfig;
use codebridge_infrastructure::ConfigStorage;
use colored::Colorize;

/// Writes `config` to the storage's `config.toml`.
///
/// An existing file is kept unless `force` is set.
pub fn write_config(storage: &ConfigStorage, config: &AppConfig, force: bool) -> Result<()> {
    let path = storage.path();
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    storage
        .save(config)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("[Cli] Wrote {}", path.display());
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codebridge_core::{Concept, Language};
    use tempfile::TempDir;

    #[test]
    fn test_write_config_round_trips_settings() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("nested").join("config.toml"));
        let mut config = AppConfig::default();
        config.api.base_url = "http://codebridge.test:8080".to_string();
        config.defaults.language = Language::Javascript;
        config.defaults.concept = Concept::new("loops");

        write_config(&storage, &config, false).unwrap();
        assert_eq!(storage.load().unwrap(), config);
    }

    #[test]
    fn test_existing_config_needs_force() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        write_config(&storage, &AppConfig::default(), false).unwrap();

        let mut changed = AppConfig::default();
        changed.api.request_timeout_secs = 5;
        let err = write_config(&storage, &changed, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(storage.load().unwrap().api.request_timeout_secs, 30);

        write_config(&storage, &changed, true).unwrap();
        assert_eq!(storage.load().unwrap().api.request_timeout_secs, 5);
    }
}
