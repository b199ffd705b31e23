//! Read-through, write-invalidate caching in front of a secret backend.
//!
//! `CachingAdapter` implements `SecretBackend` itself, so it can replace the
//! backend it wraps anywhere. The backend stays authoritative: every cache
//! interaction is best-effort and a cache failure degrades to a miss.
//!
//! Per-key cache lifecycle:
//!
//! ```text
//! ABSENT --get miss--> PRESENT(ttl?)
//! ABSENT --put, no entry, ttl != 0--> PRESENT(ttl?)
//! PRESENT --expiry | put | delete--> ABSENT
//! ```
//!
//! A hit never rewrites the entry, so a `ttl` passed on a read that hits is
//! ignored. TTL is fixed when the entry is written.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheItem, CacheStore};
use crate::errors::{Result, SecretError};
use crate::secret::{Secret, SecretOptions, SecretValue};
use crate::vault::SecretBackend;

/// Adapter-wide settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterConfig {
    /// TTL in seconds applied when a call carries none. `None` caches indefinitely.
    pub default_ttl: Option<u64>,
    /// Return `SecretError::Cache` when evicting a stale entry fails after a
    /// successful backend write or delete. Otherwise the failure is only logged.
    pub strict_invalidation: bool,
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_ttl(mut self, secs: u64) -> Self {
        self.default_ttl = Some(secs);
        self
    }

    pub fn with_strict_invalidation(mut self, strict: bool) -> Self {
        self.strict_invalidation = strict;
        self
    }
}

/// Caching decorator over a [`SecretBackend`].
pub struct CachingAdapter<B, C> {
    backend: B,
    cache: C,
    config: AdapterConfig,
}

impl<B, C> CachingAdapter<B, C>
where
    B: SecretBackend,
    C: CacheStore,
{
    pub fn new(backend: B, cache: C) -> Self {
        Self::with_config(backend, cache, AdapterConfig::default())
    }

    pub fn with_config(backend: B, cache: C, config: AdapterConfig) -> Self {
        Self {
            backend,
            cache,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn resolve_ttl(&self, ttl: Option<u64>) -> Option<u64> {
        ttl.or(self.config.default_ttl)
    }

    /// Look up a live cached secret. Any cache failure counts as a miss.
    async fn cached(&self, key: &str) -> Option<Secret> {
        match self.cache.has_item(key).await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                tracing::warn!(key = %key, "cache lookup failed, treating as miss: {}", e);
                return None;
            }
        }

        // has_item decides hit/miss; the entry may still expire before we read it
        let item = match self.cache.get_item(key).await {
            Ok(Some(item)) => item,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, "cache read failed, treating as miss: {}", e);
                return None;
            }
        };

        let value = item.into_value()?;
        match serde_json::from_value::<Secret>(value) {
            Ok(secret) => Some(secret),
            Err(e) => {
                tracing::warn!(key = %key, "undecodable cache entry, treating as miss: {}", e);
                None
            }
        }
    }

    /// Store `secret` under `key`. A ttl of zero or none means no expiration.
    async fn populate(&self, key: &str, secret: &Secret, ttl: Option<u64>) {
        let value = match serde_json::to_value(secret) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key = %key, "failed to serialize secret for cache: {}", e);
                return;
            }
        };

        let mut item = CacheItem::new(key).set(value);
        if let Some(secs) = ttl.filter(|secs| *secs > 0) {
            item = item.expires_after(Duration::from_secs(secs));
        }

        match self.cache.save(item).await {
            Ok(true) => tracing::debug!(key = %key, ttl = ?ttl, "cache populated"),
            Ok(false) => tracing::warn!(key = %key, "cache refused to save entry"),
            Err(e) => tracing::warn!(key = %key, "failed to populate cache: {}", e),
        }
    }

    /// Evict `key`. Failures are logged; in strict mode they are also returned.
    async fn invalidate(&self, key: &str) -> Result<()> {
        match self.cache.delete_item(key).await {
            Ok(removed) => {
                tracing::debug!(key = %key, removed, "cache entry invalidated");
                Ok(())
            }
            Err(e) => {
                tracing::error!(key = %key, "failed to invalidate cache entry, it may be stale: {}", e);
                if self.config.strict_invalidation {
                    Err(SecretError::Cache(e))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Whether a live entry exists. An unanswerable check is treated as present
    /// so that writes still attempt eviction.
    async fn entry_exists(&self, key: &str) -> bool {
        match self.cache.has_item(key).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!(key = %key, "cache existence check failed: {}", e);
                true
            }
        }
    }
}

#[async_trait]
impl<B, C> SecretBackend for CachingAdapter<B, C>
where
    B: SecretBackend,
    C: CacheStore,
{
    #[tracing::instrument(skip(self, options))]
    async fn get_secret(&self, key: &str, options: SecretOptions) -> Result<Secret> {
        let (ttl, options) = options.split_ttl();

        if let Some(secret) = self.cached(key).await {
            tracing::debug!("cache hit");
            return Ok(secret);
        }

        tracing::debug!("cache miss, fetching from backend");
        let secret = self.backend.get_secret(key, options).await?;
        self.populate(key, &secret, self.resolve_ttl(ttl)).await;
        Ok(secret)
    }

    #[tracing::instrument(skip(self, value, options))]
    async fn put_secret(
        &self,
        key: &str,
        value: SecretValue,
        options: SecretOptions,
    ) -> Result<()> {
        let (ttl, options) = options.split_ttl();
        let ttl = self.resolve_ttl(ttl);

        self.backend.put_secret(key, value.clone(), options).await?;

        if self.entry_exists(key).await || ttl == Some(0) {
            return self.invalidate(key).await;
        }

        self.populate(key, &Secret::new(key, value), ttl).await;
        Ok(())
    }

    #[tracing::instrument(skip(self, options))]
    async fn delete_secret(&self, key: &str, options: SecretOptions) -> Result<()> {
        self.backend.delete_secret(key, options).await?;

        if self.entry_exists(key).await {
            return self.invalidate(key).await;
        }
        Ok(())
    }
}
