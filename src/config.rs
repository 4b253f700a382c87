// Application configuration.
// Defaults match the query cache behavior of the original web client; a few
// optional environment variables override them.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::cache::CacheConfig;

/// Default GraphQL endpoint serving the demo posts.
pub const DEFAULT_ENDPOINT: &str = "https://graphqlzero.almansi.me/api";

/// Default log filter when `RUST_LOG` and `POSTPEEK_LOG` are unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// How long a successful result counts as fresh.
    pub stale_time: Duration,
    /// How long an unused cache entry survives before eviction.
    pub gc_time: Duration,
    /// Extra attempts after a failed fetch.
    pub retry: u32,
    /// Upper bound for the exponential retry delay.
    pub retry_delay_max: Duration,
    /// Log filter directive.
    pub log_level: String,
    /// Log file path (None disables logging).
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
            retry: 3,
            retry_delay_max: Duration::from_secs(30),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: log_path(),
        }
    }
}

impl Config {
    /// Build configuration from defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("POSTPEEK_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(level) = lookup("POSTPEEK_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }

        config
    }

    /// Cache engine settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            stale_time: self.stale_time,
            gc_time: self.gc_time,
            retry: self.retry,
            retry_delay_max: self.retry_delay_max,
        }
    }
}

/// Get the base cache directory (~/.cache/postpeek on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "postpeek").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("postpeek.log"))
}
