//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MDROUTE_*)
//! 2. TOML config file (if MDROUTE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cache::CacheConfig;
use crate::route::RouteTable;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MDROUTE_*)
/// 2. TOML config file (if MDROUTE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin the document root is served from.
    ///
    /// Set via MDROUTE_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory prefix for every resource path.
    #[serde(default = "default_document_root")]
    pub document_root: String,

    /// Fragment used when the location has none.
    #[serde(default = "default_home_fragment")]
    pub home_fragment: String,

    /// Fragment (and file stem) of the not-found document.
    #[serde(default = "default_not_found_fragment")]
    pub not_found_fragment: String,

    /// Region that receives the fallback view when the requested target is absent.
    #[serde(default = "default_home_fragment")]
    pub default_target: String,

    /// Prefix of every page title.
    #[serde(default = "default_base_title")]
    pub base_title: String,

    /// Content regions managed by the display updater.
    ///
    /// Set via MDROUTE_REGIONS environment variable (array syntax, e.g. `[home,blog,404]`).
    /// Numeric entries are read as text; quote them (`["0001"]`) to keep leading zeros.
    #[serde(default = "default_regions", deserialize_with = "text_list")]
    pub regions: Vec<String>,

    /// Lifetime of a cache entry in milliseconds.
    #[serde(default = "default_cache_timeout_ms")]
    pub cache_timeout_ms: u64,

    /// Maximum number of cached documents.
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,

    /// Whether the in-memory cache is used at all.
    #[serde(default = "default_true")]
    pub enable_memory_cache: bool,

    /// Whether requests carry a `_cb=<millis>` query parameter.
    #[serde(default = "default_true")]
    pub enable_cache_busting: bool,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum document body size in bytes (default: 5MB).
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Delay before scrolling to an in-page anchor.
    #[serde(default = "default_anchor_delay_ms")]
    pub anchor_delay_ms: u64,

    /// Delay between a finished load and the anchor pass.
    #[serde(default = "default_post_load_delay_ms")]
    pub post_load_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/".into()
}

fn default_document_root() -> String {
    "public".into()
}

fn default_home_fragment() -> String {
    "home".into()
}

fn default_not_found_fragment() -> String {
    "404".into()
}

fn default_base_title() -> String {
    "My Website".into()
}

fn default_regions() -> Vec<String> {
    ["home", "about", "blog", "work", "404"].into_iter().map(String::from).collect()
}

fn default_cache_timeout_ms() -> u64 {
    300_000 // 5 minutes
}

fn default_max_cache_size() -> usize {
    50
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "mdroute/0.1".into()
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_anchor_delay_ms() -> u64 {
    300
}

fn default_post_load_delay_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Settings taken verbatim from the environment. The `Env` provider parses
/// values, which would turn fragments such as `404` or `0001` into integers.
const TEXT_KEYS: &[&str] =
    &["base_url", "document_root", "home_fragment", "not_found_fragment", "default_target", "base_title", "user_agent"];

#[derive(Deserialize)]
#[serde(untagged)]
enum TextItem {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<TextItem> for String {
    fn from(item: TextItem) -> Self {
        match item {
            TextItem::Text(text) => text,
            TextItem::Unsigned(n) => n.to_string(),
            TextItem::Signed(n) => n.to_string(),
        }
    }
}

/// List of names where bare numbers (`[home,404]`) count as text.
fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<TextItem>::deserialize(deserializer)?;
    Ok(items.into_iter().map(String::from).collect())
}

fn env() -> Env {
    Env::prefixed("MDROUTE_")
        .map(|key| key.as_str().to_lowercase().into())
        .split("__")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            document_root: default_document_root(),
            home_fragment: default_home_fragment(),
            not_found_fragment: default_not_found_fragment(),
            default_target: default_home_fragment(),
            base_title: default_base_title(),
            regions: default_regions(),
            cache_timeout_ms: default_cache_timeout_ms(),
            max_cache_size: default_max_cache_size(),
            enable_memory_cache: true,
            enable_cache_busting: true,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            anchor_delay_ms: default_anchor_delay_ms(),
            post_load_delay_ms: default_post_load_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Routing convention derived from this configuration.
    pub fn route_table(&self) -> RouteTable {
        RouteTable {
            document_root: self.document_root.clone(),
            home_fragment: self.home_fragment.clone(),
            not_found_fragment: self.not_found_fragment.clone(),
        }
    }

    /// Cache store settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            timeout: Duration::from_millis(self.cache_timeout_ms),
            max_entries: self.max_cache_size,
            enabled: self.enable_memory_cache,
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MDROUTE_`
    /// 2. TOML file from `MDROUTE_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("MDROUTE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(env().ignore(TEXT_KEYS));
        for (key, value) in env().only(TEXT_KEYS).iter() {
            figment = figment.merge(Serialized::default(key.as_str(), value));
        }

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
