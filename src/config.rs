//! Client configuration (env-overridable defaults).

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.clarifai.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`crate::transport::HttpTransport`].
///
/// Environment variables:
/// - `CLARIFAI_API_KEY`
/// - `CLARIFAI_BASE_URL` (default `https://api.clarifai.com`)
/// - `CLARIFAI_HTTP_TIMEOUT_SECS` (default 30)
/// - `CLARIFAI_PROXY_URL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_url: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever is set in the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("CLARIFAI_API_KEY").ok().filter(|s| !s.is_empty()),
            base_url: env::var("CLARIFAI_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            timeout: env::var("CLARIFAI_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            proxy_url: env::var("CLARIFAI_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    /// Check the settings and return the parsed base URL.
    pub fn validate(&self) -> Result<Url> {
        if self.api_key.is_none() {
            return Err(Error::Configuration {
                message: "API key required".to_string(),
                context: ErrorContext::new()
                    .with_field_path("api_key")
                    .with_details("set CLARIFAI_API_KEY or call with_api_key"),
            });
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration("timeout must be greater than zero"));
        }
        let url = Url::parse(&self.base_url).map_err(|e| Error::Configuration {
            message: format!("invalid base URL '{}': {}", self.base_url, e),
            context: ErrorContext::new().with_field_path("base_url"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "base URL must be http(s), got '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_validate_requires_key() {
        let err = ClientConfig::new().validate().unwrap_err();
        assert!(err.is_construction());
        assert!(ClientConfig::new().with_api_key("k").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let cfg = ClientConfig::new().with_api_key("k").with_base_url("not a url");
        assert!(cfg.validate().is_err());
        let cfg = ClientConfig::new().with_api_key("k").with_base_url("ftp://example.com");
        assert!(cfg.validate().is_err());
    }
}
