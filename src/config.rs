use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Upper bound for `nonce_ttl_secs` (one year).
pub const MAX_NONCE_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Content types that get the hreflang section. `None` asks the registry.
    pub content_types: Option<Vec<String>>,
    pub nonce_ttl_secs: i64,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Per-entry hreflang URLs for content items and terms")]
pub struct Args {
    /// Host to bind to (overrides HREFLANG_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides HREFLANG_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides HREFLANG_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Comma-separated content types that get the hreflang section
    /// (overrides HREFLANG_CONTENT_TYPES; default: every public type)
    #[arg(long)]
    pub content_types: Option<String>,

    /// Lifetime of edit-form tokens in seconds (overrides HREFLANG_NONCE_TTL_SECS)
    #[arg(long)]
    pub nonce_ttl_secs: Option<i64>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        Self::merge(args)
    }

    fn merge(args: Args) -> Result<(Self, bool)> {
        // --- Environment fallback ---
        let env_host = env::var("HREFLANG_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = parse_env("HREFLANG_PORT", 3000u16)?;
        let env_db = env::var("HREFLANG_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/hreflang.db".into());
        let env_types = env::var("HREFLANG_CONTENT_TYPES").ok();
        let env_ttl = parse_env("HREFLANG_NONCE_TTL_SECS", 86_400i64)?;

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
            content_types: args
                .content_types
                .or(env_types)
                .map(|raw| split_list(&raw)),
            nonce_ttl_secs: args.nonce_ttl_secs.unwrap_or(env_ttl),
        };

        if !(1..=MAX_NONCE_TTL_SECS).contains(&cfg.nonce_ttl_secs) {
            anyhow::bail!(
                "nonce TTL must be between 1 and {} seconds, got {}",
                MAX_NONCE_TTL_SECS,
                cfg.nonce_ttl_secs
            );
        }

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
