use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecretError>;

/// Errors surfaced by secret backends and by the caching adapter.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret not found: {key}")]
    NotFound { key: String },

    #[error("backend error: {0}")]
    Backend(#[source] anyhow::Error),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

impl SecretError {
    pub fn not_found(key: impl Into<String>) -> Self {
        SecretError::NotFound { key: key.into() }
    }

    /// Wrap any backend-specific failure (transport, auth, decoding).
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        SecretError::Backend(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SecretError::NotFound { .. })
    }
}

/// Failures talking to a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid cache key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_key() {
        let err = SecretError::not_found("db/password");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "secret not found: db/password");
    }

    #[test]
    fn test_backend_wraps_anyhow() {
        let err = SecretError::backend(anyhow::anyhow!("connection refused"));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "backend error: connection refused");
    }

    #[test]
    fn test_cache_error_converts() {
        let err: SecretError = CacheError::Unavailable("redis down".into()).into();
        assert!(matches!(err, SecretError::Cache(CacheError::Unavailable(_))));
    }
}
