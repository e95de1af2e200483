//! Secret service implementation backed by [`SecretStorage`].

use crate::storage::{SecretStorage, SecretStorageError};
use codebridge_core::Result;
use codebridge_core::config::{SecretConfig, SecretService};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Loads `secret.json` once and caches it.
///
/// A missing file is not an error: it means no client key is configured.
#[derive(Clone)]
pub struct SecretServiceImpl {
    storage: Arc<SecretStorage>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(storage: SecretStorage) -> Self {
        Self {
            storage: Arc::new(storage),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self::new(SecretStorage::with_path(path))
    }

    fn load_internal(&self) -> Result<SecretConfig> {
        if let Some(cached) = self
            .secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = match self.storage.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!("[SecretService] No secret file at {}", path.display());
                SecretConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        *self.secrets.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_means_no_key() {
        let temp_dir = TempDir::new().unwrap();
        let service = SecretServiceImpl::with_path(temp_dir.path().join("secret.json"));
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.api_key(), None);
    }

    #[tokio::test]
    async fn test_secrets_are_cached() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ "openai_api_key": "sk-first" }"#).unwrap();

        let service = SecretServiceImpl::with_path(file_path.clone());
        assert_eq!(
            service.load_secrets().await.unwrap().api_key(),
            Some("sk-first")
        );

        fs::write(&file_path, r#"{ "openai_api_key": "sk-second" }"#).unwrap();
        assert_eq!(
            service.load_secrets().await.unwrap().api_key(),
            Some("sk-first")
        );
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "not json").unwrap();

        let service = SecretServiceImpl::with_path(file_path);
        assert!(service.load_secrets().await.is_err());
    }
}
