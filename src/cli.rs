use clap::{Parser, Subcommand};

/// secret-cache — read-through caching in front of a secret backend
#[derive(Parser)]
#[command(name = "secret-cache", version, about)]
pub struct Cli {
    /// Default cache TTL in seconds (overrides SECRET_CACHE_DEFAULT_TTL)
    #[arg(long, global = true)]
    pub default_ttl: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the put / cached get / delete walkthrough against in-memory stores
    Demo {
        /// Secret key to use
        #[arg(long, default_value = "baz")]
        key: String,
        /// TTL passed on the first read; ignored because that read is a cache hit
        #[arg(long, default_value = "60000")]
        ttl: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_defaults() {
        let cli = Cli::parse_from(["secret-cache", "demo"]);
        assert!(cli.default_ttl.is_none());
        match cli.command {
            Some(Commands::Demo { key, ttl }) => {
                assert_eq!(key, "baz");
                assert_eq!(ttl, 60000);
            }
            None => panic!("expected demo command"),
        }
    }

    #[test]
    fn test_global_default_ttl_after_subcommand() {
        let cli = Cli::parse_from(["secret-cache", "demo", "--key", "db", "--default-ttl", "5"]);
        assert_eq!(cli.default_ttl, Some(5));
        assert!(matches!(cli.command, Some(Commands::Demo { ref key, .. }) if key == "db"));
    }
}
