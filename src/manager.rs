use crate::errors::Result;
use crate::secret::{Secret, SecretOptions, SecretValue};
use crate::vault::SecretBackend;

/// Entry point for applications: wraps one backend (cached or not) and
/// supplies empty options for the common calls.
pub struct SecretManager<A> {
    adapter: A,
}

impl<A: SecretBackend> SecretManager<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    pub async fn get_secret(&self, key: &str) -> Result<Secret> {
        self.adapter.get_secret(key, SecretOptions::default()).await
    }

    pub async fn get_secret_with(&self, key: &str, options: SecretOptions) -> Result<Secret> {
        self.adapter.get_secret(key, options).await
    }

    pub async fn put_secret(&self, key: &str, value: impl Into<SecretValue>) -> Result<()> {
        self.adapter
            .put_secret(key, value.into(), SecretOptions::default())
            .await
    }

    pub async fn put_secret_with(
        &self,
        key: &str,
        value: impl Into<SecretValue>,
        options: SecretOptions,
    ) -> Result<()> {
        self.adapter.put_secret(key, value.into(), options).await
    }

    pub async fn delete_secret(&self, key: &str) -> Result<()> {
        self.adapter
            .delete_secret(key, SecretOptions::default())
            .await
    }

    pub async fn delete_secret_with(&self, key: &str, options: SecretOptions) -> Result<()> {
        self.adapter.delete_secret(key, options).await
    }
}
