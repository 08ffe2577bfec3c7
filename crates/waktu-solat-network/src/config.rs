use reqwest::Url;
use std::time::Duration;

use crate::error::{Result, WaktuSolatError};

/// Production endpoint of the Waktu Solat API.
pub const DEFAULT_BASE_URL: &str = "https://api.waktusolat.app";

/// Default timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
///
/// ```rust
/// use std::time::Duration;
/// use waktu_solat_network::ClientConfig;
///
/// let config = ClientConfig::new()
///     .base_url("http://localhost:8080")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url_str(), "http://localhost:8080");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("waktu-solat-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin every endpoint path is appended to. Checked when the client is built.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url_str(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent_str(&self) -> &str {
        &self.user_agent
    }

    /// Parses and validates the base URL.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` unless the URL is an absolute
    /// `http`/`https` URL without query or fragment.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            WaktuSolatError::invalid_config(format!("base URL {:?} is not valid: {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(WaktuSolatError::invalid_config(format!(
                "base URL {:?} must be an http(s) origin",
                self.base_url
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(WaktuSolatError::invalid_config(format!(
                "base URL {:?} must not carry a query or fragment",
                self.base_url
            )));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_duration(), DEFAULT_TIMEOUT);
        assert!(config.user_agent_str().starts_with("waktu-solat-rs/"));
        assert!(config.parsed_base_url().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new()
            .base_url("http://127.0.0.1:9000/api")
            .timeout(Duration::from_millis(250))
            .user_agent("tests");
        assert_eq!(config.timeout_duration(), Duration::from_millis(250));
        assert_eq!(config.user_agent_str(), "tests");
        assert_eq!(config.parsed_base_url().unwrap().path(), "/api");
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        for bad in ["not a url", "ftp://example.com", "mailto:someone@example.com", "https://x.test/?a=1"] {
            let err = ClientConfig::new().base_url(bad).parsed_base_url().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{bad}");
        }
    }
}
