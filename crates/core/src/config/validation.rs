//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must not be empty".into() });
    }
    Ok(())
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is not an absolute http(s) URL
    /// - `max_cache_size` or `cache_timeout_ms` is 0
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - a fragment, the document root or the user agent is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "base_url".into(),
                    reason: format!("unsupported scheme: {}", url.scheme()),
                });
            }
            Err(e) => return Err(ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() }),
        }

        if self.max_cache_size == 0 {
            return Err(ConfigError::Invalid {
                field: "max_cache_size".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.cache_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_timeout_ms".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        require_non_empty("document_root", &self.document_root)?;
        require_non_empty("home_fragment", &self.home_fragment)?;
        require_non_empty("not_found_fragment", &self.not_found_fragment)?;
        require_non_empty("user_agent", &self.user_agent)?;

        if self.not_found_fragment.contains('/') {
            return Err(ConfigError::Invalid {
                field: "not_found_fragment".into(),
                reason: "must be a single path segment".into(),
            });
        }

        if !self.regions.iter().any(|r| r == &self.default_target) {
            tracing::warn!(
                default_target = %self.default_target,
                region_count = self.regions.len(),
                "default_target is not a managed region; fallback views may not be visible"
            );
        }

        Ok(())
    }
}
