use crate::adapter::AdapterConfig;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Default cache TTL in seconds for calls that carry none.
    /// Set via SECRET_CACHE_DEFAULT_TTL. Unset = cache until invalidated.
    pub default_ttl: Option<u64>,
    /// Surface cache eviction failures as errors.
    /// Set via SECRET_CACHE_STRICT_INVALIDATION. Default: false.
    pub strict_invalidation: bool,
    /// Emit JSON log lines instead of the human-readable format.
    /// Set via SECRET_CACHE_LOG_JSON. Default: false.
    pub log_json: bool,
}

impl Config {
    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            default_ttl: self.default_ttl,
            strict_invalidation: self.strict_invalidation,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    from_lookup(|name| std::env::var(name).ok())
}

fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let default_ttl = match lookup("SECRET_CACHE_DEFAULT_TTL") {
        Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|e| {
            anyhow::anyhow!(
                "SECRET_CACHE_DEFAULT_TTL must be a non-negative integer, got {:?}: {}",
                raw,
                e
            )
        })?),
        _ => None,
    };

    Ok(Config {
        default_ttl,
        strict_invalidation: lookup("SECRET_CACHE_STRICT_INVALIDATION")
            .map(|v| parse_flag(&v))
            .unwrap_or(false),
        log_json: lookup("SECRET_CACHE_LOG_JSON")
            .map(|v| parse_flag(&v))
            .unwrap_or(false),
    })
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
