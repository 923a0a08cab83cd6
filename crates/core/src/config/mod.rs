//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SUBGRAB_*)
//! 2. TOML config file (if SUBGRAB_CONFIG_FILE set)
//! 3. Built-in defaults

use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SUBGRAB_*)
/// 2. TOML config file (if SUBGRAB_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the subtitle listing site.
    ///
    /// Set via SUBGRAB_BASE_URI environment variable.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,

    /// Accepted language labels for subtitle downloads.
    ///
    /// Matching is case-sensitive and exact. Set via SUBGRAB_LANGUAGES
    /// environment variable (comma-separated).
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// First listing page to crawl (inclusive).
    ///
    /// Set via SUBGRAB_FIRST_PAGE environment variable.
    #[serde(default)]
    pub first_page: u32,

    /// Last listing page to crawl (exclusive).
    ///
    /// Set via SUBGRAB_LAST_PAGE environment variable.
    #[serde(default = "default_last_page")]
    pub last_page: u32,

    /// Directory holding cached responses.
    ///
    /// Set via SUBGRAB_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Maximum age of a cached response before it is refetched, in seconds.
    ///
    /// Set via SUBGRAB_CACHE_MAX_AGE_SECS environment variable.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SUBGRAB_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SUBGRAB_FETCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Maximum number of concurrent fetches during crawl and resolve.
    ///
    /// Set via SUBGRAB_MAX_CONCURRENCY environment variable. 1 gives the
    /// strictly sequential behavior.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_base_uri() -> String {
    "http://www.yifysubtitles.com".into()
}

fn default_languages() -> Vec<String> {
    vec!["English".into()]
}

fn default_last_page() -> u32 {
    10
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}

fn default_cache_max_age_secs() -> u64 {
    3600
}

fn default_user_agent() -> String {
    "subgrab/0.1".into()
}

fn default_fetch_timeout_ms() -> u64 {
    20_000
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
            languages: default_languages(),
            first_page: 0,
            last_page: default_last_page(),
            cache_dir: default_cache_dir(),
            cache_max_age_secs: default_cache_max_age_secs(),
            user_agent: default_user_agent(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl AppConfig {
    /// Fetch timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Cache staleness threshold as Duration.
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    /// Listing page indices to crawl.
    pub fn page_range(&self) -> Range<u32> {
        self.first_page..self.last_page
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SUBGRAB_`
    /// 2. TOML file from `SUBGRAB_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SUBGRAB_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SUBGRAB_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
