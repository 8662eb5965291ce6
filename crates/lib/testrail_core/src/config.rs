//! Client configuration.
//!
//! Resolves TestRail connection settings from environment variables. The
//! lookup is injectable so resolution can be tested without touching the
//! process environment.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::transport::RetryPolicy;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_URL: &str = "TESTRAIL_URL";
pub const ENV_USERNAME: &str = "TESTRAIL_USERNAME";
pub const ENV_API_KEY: &str = "TESTRAIL_API_KEY";
pub const ENV_PASSWORD: &str = "TESTRAIL_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "TESTRAIL_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "TESTRAIL_MAX_RETRIES";

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid TestRail URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Resolved connection settings for a TestRail instance.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Instance base URL without trailing slash (e.g. `https://acme.testrail.io`).
    pub base_url: String,
    /// Login email.
    pub username: String,
    /// API key or password.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Automatic retry behaviour for transient failures.
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Build a config from explicit values, validating the URL and
    /// credentials.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: normalize_base_url(&base_url.into()),
            username: username.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable                | Default            |
    /// |-------------------------|--------------------|
    /// | `TESTRAIL_URL`          | required           |
    /// | `TESTRAIL_USERNAME`     | required           |
    /// | `TESTRAIL_API_KEY`      | `TESTRAIL_PASSWORD`, else required |
    /// | `TESTRAIL_TIMEOUT_SECS` | `30`               |
    /// | `TESTRAIL_MAX_RETRIES`  | `3`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Every missing required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_URL);
        let username = get(ENV_USERNAME);
        let api_key = get(ENV_API_KEY).or_else(|| get(ENV_PASSWORD));

        let mut missing = Vec::new();
        if base_url.is_none() {
            missing.push(ENV_URL);
        }
        if username.is_none() {
            missing.push(ENV_USERNAME);
        }
        if api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        let (Some(base_url), Some(username), Some(api_key)) = (base_url, username, api_key) else {
            return Err(ConfigError::Missing(missing));
        };

        let mut config = Self::new(base_url, username, api_key)?;

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(ENV_MAX_RETRIES) {
            let attempts: u32 = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: ENV_MAX_RETRIES,
                    value: raw.clone(),
                })?;
            config.retry.max_attempts = attempts;
        }

        Ok(config)
    }

    /// Check that the URL parses as http(s) and credentials are non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.base_url.is_empty() {
            missing.push(ENV_URL);
        }
        if self.username.trim().is_empty() {
            missing.push(ENV_USERNAME);
        }
        if self.api_key.trim().is_empty() {
            missing.push(ENV_API_KEY);
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let parsed = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        Ok(())
    }
}

/// Strip surrounding whitespace and trailing slashes. A pasted
/// `.../index.php` suffix is dropped too since the transport appends it.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/index.php")
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn resolves_required_values_and_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://acme.testrail.io/"),
            (ENV_USERNAME, "qa@acme.io"),
            (ENV_API_KEY, "secret"),
        ]))
        .expect("config");

        assert_eq!(config.base_url, "https://acme.testrail.io");
        assert_eq!(config.username, "qa@acme.io");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_USERNAME, "qa@acme.io")]))
            .expect_err("should fail");
        match err {
            ConfigError::Missing(vars) => assert_eq!(vars, vec![ENV_URL, ENV_API_KEY]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "  "),
            (ENV_USERNAME, "qa@acme.io"),
            (ENV_API_KEY, "secret"),
        ]))
        .expect_err("should fail");
        assert!(matches!(err, ConfigError::Missing(vars) if vars == vec![ENV_URL]));
    }

    #[test]
    fn password_is_accepted_as_api_key_fallback() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://acme.testrail.io"),
            (ENV_USERNAME, "qa@acme.io"),
            (ENV_PASSWORD, "hunter2"),
        ]))
        .expect("config");
        assert_eq!(config.api_key, "hunter2");
    }

    #[test]
    fn index_php_suffix_is_stripped() {
        let config =
            ClientConfig::new("https://acme.testrail.io/index.php/", "qa@acme.io", "secret")
                .expect("config");
        assert_eq!(config.base_url, "https://acme.testrail.io");
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = ClientConfig::new("ftp://acme.testrail.io", "qa@acme.io", "secret")
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = ClientConfig::new("not a url", "qa@acme.io", "secret").expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn parses_timeout_and_retry_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://acme.testrail.io"),
            (ENV_USERNAME, "qa@acme.io"),
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MAX_RETRIES, "1"),
        ]))
        .expect("config");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn rejects_zero_retry_attempts() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_URL, "https://acme.testrail.io"),
            (ENV_USERNAME, "qa@acme.io"),
            (ENV_API_KEY, "secret"),
            (ENV_MAX_RETRIES, "0"),
        ]))
        .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == ENV_MAX_RETRIES));
    }
}
