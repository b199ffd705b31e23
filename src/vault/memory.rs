use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::{Result, SecretError};
use crate::secret::{Secret, SecretOptions, SecretValue};

/// In-process backend keeping secrets in a DashMap.
/// Backs the demo binary and tests; nothing is persisted or encrypted.
#[derive(Default)]
pub struct MemoryBackend {
    secrets: DashMap<String, SecretValue>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.secrets.contains_key(key)
    }
}

#[async_trait]
impl super::SecretBackend for MemoryBackend {
    async fn get_secret(&self, key: &str, _options: SecretOptions) -> Result<Secret> {
        self.secrets
            .get(key)
            .map(|value| Secret::new(key, value.clone()))
            .ok_or_else(|| SecretError::not_found(key))
    }

    async fn put_secret(
        &self,
        key: &str,
        value: SecretValue,
        _options: SecretOptions,
    ) -> Result<()> {
        self.secrets.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_secret(&self, key: &str, _options: SecretOptions) -> Result<()> {
        self.secrets
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| SecretError::not_found(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::SecretBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_get_delete() {
        let backend = MemoryBackend::new();
        backend
            .put_secret("db", json!({"password": "hunter2"}), SecretOptions::new())
            .await
            .unwrap();

        let secret = backend.get_secret("db", SecretOptions::new()).await.unwrap();
        assert_eq!(secret.key(), "db");
        assert_eq!(secret["password"], "hunter2");

        backend.delete_secret("db", SecretOptions::new()).await.unwrap();
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend
            .get_secret("nope", SecretOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = backend
            .delete_secret("nope", SecretOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
