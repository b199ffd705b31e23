use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::time::Instant;

use crate::errors::CacheError;

/// A single cache slot: the stored value plus an optional lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheItem {
    key: String,
    value: Option<Value>,
    expires_after: Option<Duration>,
}

impl CacheItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            expires_after: None,
        }
    }

    pub fn set(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Expire the item `ttl` after it is saved. Without this the item never expires.
    pub fn expires_after(mut self, ttl: Duration) -> Self {
        self.expires_after = Some(ttl);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<Value> {
        self.value
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.expires_after
    }

    pub fn is_hit(&self) -> bool {
        self.value.is_some()
    }
}

/// Generic key-value cache with per-item expiration.
///
/// Expired items must behave exactly like absent ones for every method.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn has_item(&self, key: &str) -> Result<bool, CacheError>;

    /// Returns `None` on miss or expiry.
    async fn get_item(&self, key: &str) -> Result<Option<CacheItem>, CacheError>;

    /// Persist `item`, replacing whatever is stored under its key.
    async fn save(&self, item: CacheItem) -> Result<bool, CacheError>;

    /// Returns whether an item was removed.
    async fn delete_item(&self, key: &str) -> Result<bool, CacheError>;
}

#[async_trait]
impl<C: CacheStore + ?Sized> CacheStore for Arc<C> {
    async fn has_item(&self, key: &str) -> Result<bool, CacheError> {
        (**self).has_item(key).await
    }

    async fn get_item(&self, key: &str) -> Result<Option<CacheItem>, CacheError> {
        (**self).get_item(key).await
    }

    async fn save(&self, item: CacheItem) -> Result<bool, CacheError> {
        (**self).save(item).await
    }

    async fn delete_item(&self, key: &str) -> Result<bool, CacheError> {
        (**self).delete_item(key).await
    }
}

/// Entry stored in the DashMap with an optional expiry deadline.
#[derive(Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// In-process cache store.
///
/// Values are kept as JSON text. TTLs are checked on read and expired entries
/// evicted lazily; `evict_expired()` sweeps the whole map.
#[derive(Default)]
pub struct MemoryCacheStore {
    local: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all expired entries. Returns how many were dropped.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.local.retain(|_, entry| {
            let keep = entry.is_live(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        let now = Instant::now();
        let entry = self.local.get(key)?;
        if entry.is_live(now) {
            return Some(entry.clone());
        }
        // expired: drop the ref before removing, and leave a concurrent replacement alone
        drop(entry);
        self.local.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn has_item(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        Ok(self.live_entry(key).is_some())
    }

    async fn get_item(&self, key: &str) -> Result<Option<CacheItem>, CacheError> {
        validate_key(key)?;
        match self.live_entry(key) {
            Some(entry) => {
                let value: Value = serde_json::from_str(&entry.value)?;
                Ok(Some(CacheItem::new(key).set(value)))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, item: CacheItem) -> Result<bool, CacheError> {
        validate_key(item.key())?;
        let Some(value) = item.get() else {
            return Ok(false);
        };
        let entry = CacheEntry {
            value: serde_json::to_string(value)?,
            expires_at: item.ttl().map(|ttl| Instant::now() + ttl),
        };
        self.local.insert(item.key, entry);
        Ok(true)
    }

    async fn delete_item(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        Ok(self.local.remove(key).is_some())
    }
}
