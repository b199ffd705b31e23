use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use secret_cache::adapter::CachingAdapter;
use secret_cache::cache::MemoryCacheStore;
use secret_cache::config;
use secret_cache::manager::SecretManager;
use secret_cache::secret::SecretOptions;
use secret_cache::vault::memory::MemoryBackend;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cfg = config::load()?;
    let args = cli::Cli::parse();
    if args.default_ttl.is_some() {
        cfg.default_ttl = args.default_ttl;
    }

    init_tracing(cfg.log_json);

    match args.command {
        Some(cli::Commands::Demo { key, ttl }) => run_demo(&cfg, &key, ttl).await,
        None => {
            println!("No command given. Try `secret-cache demo` or `secret-cache --help`.");
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "secret_cache=debug".into()),
    );
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// put -> cached get (ttl ignored) -> cached get -> delete -> get fails with not-found.
async fn run_demo(cfg: &config::Config, key: &str, ttl: u64) -> anyhow::Result<()> {
    let adapter = CachingAdapter::with_config(
        MemoryBackend::new(),
        MemoryCacheStore::new(),
        cfg.adapter_config(),
    );
    let manager = SecretManager::new(adapter);

    manager.put_secret(key, json!({"foo": "foobar"})).await?;
    println!("put {key} -> cache entries: {}", manager.adapter().cache().len());

    let secret = manager
        .get_secret_with(key, SecretOptions::new().with_ttl(ttl))
        .await?;
    println!("get {key} (ttl={ttl}) -> {}", secret.value());

    let secret = manager.get_secret(key).await?;
    println!("get {key}[\"foo\"] -> {}", secret["foo"]);

    manager.delete_secret(key).await?;
    println!("delete {key} -> cache entries: {}", manager.adapter().cache().len());

    match manager.get_secret(key).await {
        Ok(secret) => anyhow::bail!("expected {key} to be gone, got {}", secret.value()),
        Err(e) if e.is_not_found() => println!("get {key} -> {e}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
