pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::secret::{Secret, SecretOptions, SecretValue};

/// Abstraction over secret storage backends.
/// Implementations: MemoryBackend (in-process), CachingAdapter (decorates another backend).
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Fetch the secret stored under `key`.
    /// Fails with `SecretError::NotFound` when the key does not exist.
    async fn get_secret(&self, key: &str, options: SecretOptions) -> Result<Secret>;

    /// Create or overwrite the secret stored under `key`.
    async fn put_secret(&self, key: &str, value: SecretValue, options: SecretOptions)
        -> Result<()>;

    /// Delete the secret stored under `key`.
    /// Fails with `SecretError::NotFound` when the key does not exist.
    async fn delete_secret(&self, key: &str, options: SecretOptions) -> Result<()>;
}

#[async_trait]
impl<B: SecretBackend + ?Sized> SecretBackend for Arc<B> {
    async fn get_secret(&self, key: &str, options: SecretOptions) -> Result<Secret> {
        (**self).get_secret(key, options).await
    }

    async fn put_secret(
        &self,
        key: &str,
        value: SecretValue,
        options: SecretOptions,
    ) -> Result<()> {
        (**self).put_secret(key, value, options).await
    }

    async fn delete_secret(&self, key: &str, options: SecretOptions) -> Result<()> {
        (**self).delete_secret(key, options).await
    }
}

#[async_trait]
impl<B: SecretBackend + ?Sized> SecretBackend for Box<B> {
    async fn get_secret(&self, key: &str, options: SecretOptions) -> Result<Secret> {
        (**self).get_secret(key, options).await
    }

    async fn put_secret(
        &self,
        key: &str,
        value: SecretValue,
        options: SecretOptions,
    ) -> Result<()> {
        (**self).put_secret(key, value, options).await
    }

    async fn delete_secret(&self, key: &str, options: SecretOptions) -> Result<()> {
        (**self).delete_secret(key, options).await
    }
}
