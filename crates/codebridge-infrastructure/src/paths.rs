//! Path management for codebridge configuration files.
//!
//! ```text
//! <config_dir>/codebridge/
//! ├── config.toml     # Application configuration
//! └── secret.json     # Client-side API key
//! ```
//!
//! `<config_dir>` is the platform config directory reported by `dirs`
//! (`~/.config` on Linux, `~/Library/Application Support` on macOS).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "codebridge";
const CONFIG_FILE: &str = "config.toml";
const SECRET_FILE: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves codebridge file locations, optionally under a custom base
/// directory (used by tests and `--config`).
#[derive(Debug, Clone, Default)]
pub struct CodebridgePaths {
    base: Option<PathBuf>,
}

impl CodebridgePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// The codebridge configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// # Security Note
    ///
    /// Keep this file readable by the current user only (e.g. 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SECRET_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CodebridgePaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path());
        assert_eq!(
            paths.config_file().unwrap(),
            temp_dir.path().join("config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            temp_dir.path().join("secret.json")
        );
    }

    #[test]
    fn test_default_directory_ends_with_app_dir() {
        // Not every CI box has a config dir; only check when one exists.
        if let Ok(dir) = CodebridgePaths::default().config_dir() {
            assert!(dir.ends_with("codebridge"));
        }
    }
}
