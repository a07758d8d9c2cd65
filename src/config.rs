//! Desk configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:10000";
pub const DEFAULT_CONTEXT_CAPACITY: u64 = 16;
pub const DEFAULT_NOTICE_TTL_MS: u64 = 4000;
pub const DEFAULT_SESSION_USER: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("context capacity must be at least 1")]
    ZeroCapacity,
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
    /// Number of retained exchanges that fills the context window.
    pub context_capacity: u64,
    /// Lifetime of transient notices.
    pub notice_ttl: Duration,
    /// Session flag injected by the host page.
    pub initially_authenticated: bool,
    /// Display name for a restored session, when the host knows it.
    pub session_user: Option<String>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            context_capacity: DEFAULT_CONTEXT_CAPACITY,
            notice_ttl: Duration::from_millis(DEFAULT_NOTICE_TTL_MS),
            initially_authenticated: false,
            session_user: None,
        }
    }
}

impl DeskConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `CHATDESK_BASE_URL`: backend origin (default `http://127.0.0.1:10000`)
    /// - `CHATDESK_CONTEXT_CAPACITY`: default 16, must be non-zero
    /// - `CHATDESK_NOTICE_TTL_MS`: default 4000, must be a whole number
    /// - `CHATDESK_AUTHENTICATED`: `1/true/yes/on` or `0/false/no/off`
    /// - `CHATDESK_SESSION_USER`: name shown for a restored session
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("CHATDESK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());

        let context_capacity = env_parse_u64("CHATDESK_CONTEXT_CAPACITY", DEFAULT_CONTEXT_CAPACITY)?;
        let notice_ttl_ms = env_parse_u64("CHATDESK_NOTICE_TTL_MS", DEFAULT_NOTICE_TTL_MS)?;

        let initially_authenticated = match std::env::var("CHATDESK_AUTHENTICATED") {
            Ok(raw) => {
                parse_bool(&raw).ok_or(ConfigError::InvalidValue { key: "CHATDESK_AUTHENTICATED", value: raw.clone() })?
            }
            Err(_) => false,
        };

        let session_user = std::env::var("CHATDESK_SESSION_USER")
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let config = Self {
            base_url,
            context_capacity,
            notice_ttl: Duration::from_millis(notice_ttl_ms),
            initially_authenticated,
            session_user,
        };
        config.validated()
    }

    /// Normalize the base URL and check invariants. Call after applying
    /// overrides on top of [`DeskConfig::from_env`].
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_owned();
        if let Err(e) = reqwest::Url::parse(&trimmed) {
            return Err(ConfigError::InvalidBaseUrl { url: self.base_url, reason: e.to_string() });
        }
        if self.context_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        self.base_url = trimmed;
        Ok(self)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Unset falls back to `default`; set but unparsable is an error.
fn env_parse_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
