//! secret-cache — a caching decorator for secret backends.
//!
//! Wrap any [`vault::SecretBackend`] in an [`adapter::CachingAdapter`] to get
//! read-through caching on get and invalidation on put/delete, with the
//! backend remaining the source of truth.

pub mod adapter;
pub mod cache;
pub mod config;
pub mod errors;
pub mod manager;
pub mod secret;
pub mod vault;

pub use adapter::{AdapterConfig, CachingAdapter};
pub use cache::{CacheItem, CacheStore, MemoryCacheStore};
pub use errors::{CacheError, Result, SecretError};
pub use manager::SecretManager;
pub use secret::{Secret, SecretOptions, SecretValue};
pub use vault::SecretBackend;
