//! Remote platform API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default API root. Matches the platform's local development proxy.
fn default_base_url() -> String {
    "http://localhost:8000/api".to_owned()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root URL every endpoint path is joined to, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Validate the section before a client is built from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the base URL is empty or
    /// not an http(s) URL, or when the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "timeout must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let config = ApiConfig {
            base_url: "ftp://example.com".into(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
